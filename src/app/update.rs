//! State transitions. Nothing here touches the network; work that needs it is
//! returned as [`Effect`]s for the shell to run.

use super::actions::Action;
use super::events::{Effect, NetworkEvent};
use super::state::{AppState, Availability, ExplorerState, GeneratorField, InputMode, Toast};
use crate::analysis::{HIGHLIGHT_CANDIDATES, Projection, top_words};
use crate::dataset::{DatasetError, Loadable};
use crate::generation::GenerationRequest;
use crate::routing::{Route, View};

const PAGE: usize = 10;

impl AppState {
    /// Kick off the initial dataset load and availability probe. Both run
    /// independently.
    pub fn start(&mut self) -> Vec<Effect> {
        self.dataset.begin();
        self.status = format!("Loading {}", self.source);
        vec![Effect::LoadDataset(self.source.clone()), self.check_availability()]
    }

    pub fn on_network(&mut self, ev: NetworkEvent) -> Vec<Effect> {
        match ev {
            NetworkEvent::DatasetLoaded(result) => {
                if !self.dataset.complete(result) {
                    tracing::warn!("dataset load finished twice, ignoring");
                    return Vec::new();
                }
                match &self.dataset {
                    Loadable::Ready(ds) => {
                        self.projection = Projection::new(ds);
                        self.nav.initialize(&self.projection.artists);
                        self.status = format!("{} artists", self.projection.artists.len());
                        let view = self.nav.view();
                        self.after_navigation(view)
                    }
                    Loadable::Failed(e) => {
                        tracing::error!("dataset load failed: {e}");
                        self.projection = Projection::default();
                        self.status = "Failed to load data".into();
                        Vec::new()
                    }
                    _ => Vec::new(),
                }
            }
            NetworkEvent::SongsLoaded { ticket, key, result } => {
                if ticket != self.explorer.ticket {
                    tracing::debug!(ticket, current = self.explorer.ticket, "dropping stale song list");
                    return Vec::new();
                }
                if let Ok(songs) = &result {
                    self.song_cache.put(key, songs.clone());
                }
                if let Err(e) = &result {
                    tracing::warn!("song list failed: {e}");
                }
                if self.explorer.songs.complete(result) {
                    self.songs_arrived();
                }
                Vec::new()
            }
            NetworkEvent::Availability { ticket, up } => {
                if ticket != self.generator.probe {
                    tracing::debug!(ticket, current = self.generator.probe, "dropping stale availability check");
                    return Vec::new();
                }
                tracing::info!(up, "generation service availability");
                self.generator.availability = if up {
                    Availability::Available
                } else {
                    Availability::Unavailable
                };
                Vec::new()
            }
            NetworkEvent::Generated { ticket, result } => {
                if self.generator.in_flight != Some(ticket) {
                    tracing::debug!(ticket, "dropping stale generation result");
                    return Vec::new();
                }
                self.generator.in_flight = None;
                match result {
                    Ok(text) => self.generator.result = Some(text),
                    Err(e) => self.generator.error = Some(format!("Failed to generate lyrics: {e}")),
                }
                Vec::new()
            }
        }
    }

    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        let prev = self.nav.view();
        match action {
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            Action::Resize => Vec::new(),
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                Vec::new()
            }
            Action::Reload => self.reload(),

            Action::NextView => self.open_view(prev.next()),
            Action::PrevView => self.open_view(prev.prev()),
            Action::OpenView(view) => self.open_view(view),
            Action::Back => {
                if self.nav.back(&self.projection.artists) {
                    self.after_navigation(prev)
                } else {
                    Vec::new()
                }
            }
            Action::Forward => {
                if self.nav.forward(&self.projection.artists) {
                    self.after_navigation(prev)
                } else {
                    Vec::new()
                }
            }

            Action::StartLocationInput => {
                self.location_input = self.nav.route().to_string();
                self.input_mode = InputMode::Location;
                Vec::new()
            }
            Action::InputChar(c) => {
                self.edit_input(|s| s.push(c));
                Vec::new()
            }
            Action::Backspace => {
                self.edit_input(|s| {
                    s.pop();
                });
                Vec::new()
            }
            Action::ClearInput => {
                self.edit_input(String::clear);
                Vec::new()
            }
            Action::SubmitInput => self.submit_input(),
            Action::CancelInput => {
                if self.input_mode == InputMode::Location {
                    self.location_input.clear();
                }
                self.input_mode = InputMode::Normal;
                Vec::new()
            }

            Action::PrevArtist => self.step_artist(-1),
            Action::NextArtist => self.step_artist(1),
            Action::OpenArtistPicker => {
                self.open_picker();
                Vec::new()
            }
            Action::PickerUp => {
                self.picker.selected = self.picker.selected.saturating_sub(1);
                Vec::new()
            }
            Action::PickerDown => {
                let last = self.projection.artists.len().saturating_sub(1);
                self.picker.selected = (self.picker.selected + 1).min(last);
                Vec::new()
            }
            Action::PickerConfirm => self.confirm_picker(),

            Action::ListUp => self.move_list(-1),
            Action::ListDown => self.move_list(1),
            Action::PageUp => self.move_list(-(PAGE as isize)),
            Action::PageDown => self.move_list(PAGE as isize),
            Action::GoTop => self.move_list(isize::MIN),
            Action::GoBottom => self.move_list(isize::MAX),

            Action::MoreWords => {
                let available = self.displayed_record().map(|(_, r)| r.words.len()).unwrap_or(0);
                self.stats.words_to_show = self.stats.words_to_show.increase(available);
                Vec::new()
            }
            Action::FewerWords => {
                self.stats.words_to_show = self.stats.words_to_show.decrease();
                Vec::new()
            }
            Action::NextGeneration => {
                let total = self.displayed_record().map(|(_, r)| r.generations.len()).unwrap_or(0);
                if self.stats.generation + 1 < total {
                    self.stats.generation += 1;
                }
                Vec::new()
            }
            Action::PrevGeneration => {
                self.stats.generation = self.stats.generation.saturating_sub(1);
                Vec::new()
            }
            Action::TagLeft => {
                self.stats.tag_cursor = self.stats.tag_cursor.saturating_sub(1);
                Vec::new()
            }
            Action::TagRight => {
                let tags = self.highlight_candidates().len();
                if self.stats.tag_cursor + 1 < tags {
                    self.stats.tag_cursor += 1;
                }
                Vec::new()
            }
            Action::ToggleTag => {
                let word = self.highlight_candidates().get(self.stats.tag_cursor).cloned();
                if let Some(word) = word {
                    let hl = &mut self.stats.highlighted;
                    match hl.iter().position(|w| *w == word) {
                        Some(i) => {
                            hl.remove(i);
                        }
                        None => hl.push(word),
                    }
                }
                Vec::new()
            }

            Action::StartSearch => {
                if prev == View::Dataset && self.explorer.songs.ready().is_some() {
                    self.input_mode = InputMode::Search;
                }
                Vec::new()
            }
            Action::OpenSong => {
                let ex = &mut self.explorer;
                if let Some(&i) = ex.filtered.get(ex.list_selected) {
                    ex.current = Some(i);
                    ex.lyric_scroll = 0;
                }
                Vec::new()
            }
            Action::NextSong => {
                self.step_song(1);
                Vec::new()
            }
            Action::PrevSong => {
                self.step_song(-1);
                Vec::new()
            }
            Action::ScrollLyricUp => {
                self.explorer.lyric_scroll = self.explorer.lyric_scroll.saturating_sub(1);
                Vec::new()
            }
            Action::ScrollLyricDown => {
                self.explorer.lyric_scroll = self.explorer.lyric_scroll.saturating_add(1);
                Vec::new()
            }

            Action::FocusNext => {
                self.generator.focus = self.generator.focus.next();
                Vec::new()
            }
            Action::FocusPrev => {
                self.generator.focus = self.generator.focus.prev();
                Vec::new()
            }
            Action::OptionNext => {
                self.cycle_option(1);
                Vec::new()
            }
            Action::OptionPrev => {
                self.cycle_option(-1);
                Vec::new()
            }
            Action::EditPrompt => {
                if prev == View::Generator {
                    self.generator.focus = GeneratorField::Prompt;
                    self.input_mode = InputMode::Prompt;
                }
                Vec::new()
            }
            Action::Generate => self.generate(),
        }
    }

    fn reload(&mut self) -> Vec<Effect> {
        if self.dataset.is_loading() {
            return Vec::new();
        }
        tracing::info!("reloading dataset");
        self.toast = Some(Toast::info("Reloading data"));
        self.dataset.begin();
        self.song_cache.clear();
        self.stats.bound_to = None;
        let ticket = self.explorer.ticket + 1;
        self.explorer = ExplorerState {
            ticket,
            ..ExplorerState::default()
        };
        vec![Effect::LoadDataset(self.source.clone())]
    }

    fn open_view(&mut self, view: View) -> Vec<Effect> {
        let prev = self.nav.view();
        self.nav.open_view(view, &self.projection.artists);
        self.after_navigation(prev)
    }

    /// Bring the views in line with the current location.
    fn after_navigation(&mut self, prev: View) -> Vec<Effect> {
        let view = self.nav.view();
        let mut effects = Vec::new();

        if view != View::Generator && self.generator.in_flight.take().is_some() {
            tracing::debug!("left generator view, abandoning request");
        }
        if self.input_mode != InputMode::Normal {
            self.input_mode = InputMode::Normal;
        }

        match view {
            View::ArtistStats => self.bind_stats(),
            View::Dataset => effects.extend(self.bind_explorer()),
            View::Generator if prev != View::Generator => effects.push(self.check_availability()),
            _ => {}
        }
        effects
    }

    fn bind_stats(&mut self) {
        let route = self.nav.route().clone();
        if self.stats.bound_to.as_ref() == Some(&route) {
            return;
        }
        let Some((_, record)) = self.displayed_record() else {
            return;
        };
        let generations = record.generations.len();
        let words = record.words.len();

        let stats = &mut self.stats;
        stats.generation = route
            .index
            .map(|i| i - 1)
            .filter(|&i| i < generations)
            .unwrap_or(0);
        stats.highlighted.clear();
        stats.tag_cursor = 0;
        stats.words_scroll = 0;
        stats.words_to_show = stats.words_to_show.clamp_to(words);
        stats.bound_to = Some(route);
    }

    fn bind_explorer(&mut self) -> Vec<Effect> {
        let route = self.nav.route().clone();
        if self.explorer.bound_to.as_ref() == Some(&route) {
            return Vec::new();
        }
        let Some((_, record)) = self.displayed_record() else {
            return Vec::new();
        };
        let url = record.url_dataset.clone();

        self.explorer.bound_to = Some(route.clone());
        self.explorer.initial_index = route.index;

        let source = match url.as_deref().map(|u| self.source.join(u)) {
            Some(Ok(source)) => source,
            Some(Err(e)) => {
                self.fail_songs(e.to_string());
                return Vec::new();
            }
            None => {
                self.fail_songs(DatasetError::MissingUrl.to_string());
                return Vec::new();
            }
        };
        let key = source.key();

        if self.explorer.songs_key.as_deref() == Some(key.as_str()) && self.explorer.songs.ready().is_some() {
            self.songs_arrived();
            return Vec::new();
        }

        self.explorer.ticket += 1;
        self.explorer.songs_key = Some(key.clone());
        if let Some(songs) = self.song_cache.get(&key).cloned() {
            self.explorer.songs = Loadable::Ready(songs);
            self.songs_arrived();
            return Vec::new();
        }

        self.explorer.songs.begin();
        vec![Effect::LoadSongs {
            ticket: self.explorer.ticket,
            source,
        }]
    }

    fn fail_songs(&mut self, message: String) {
        let ex = &mut self.explorer;
        ex.ticket += 1;
        ex.songs_key = None;
        ex.songs = Loadable::Failed(message);
        ex.filtered.clear();
        ex.current = None;
        ex.search.clear();
    }

    /// Reset the explorer for a freshly shown song list.
    fn songs_arrived(&mut self) {
        let ex = &mut self.explorer;
        let len = ex.song_list().len();
        ex.search.clear();
        ex.filtered = (0..len).collect();
        ex.lyric_scroll = 0;
        ex.current = match ex.initial_index {
            Some(n) => n.checked_sub(1).filter(|&i| i < len),
            None => (len > 0).then_some(0),
        };
        ex.list_selected = ex.current.unwrap_or(0);
    }

    fn refilter(&mut self) {
        let ex = &mut self.explorer;
        ex.filtered = crate::analysis::text::filter_songs(
            ex.songs.ready().map(|s| s.as_slice()).unwrap_or(&[]),
            &ex.search,
        );
        ex.list_selected = ex
            .current
            .and_then(|c| ex.filtered.iter().position(|&i| i == c))
            .unwrap_or(0);
    }

    fn step_song(&mut self, delta: isize) {
        let ex = &mut self.explorer;
        let len = ex.song_list().len();
        let Some(cur) = ex.current else {
            return;
        };
        let next = cur.saturating_add_signed(delta).min(len.saturating_sub(1));
        if next != cur {
            ex.current = Some(next);
            ex.lyric_scroll = 0;
            if let Some(pos) = ex.filtered.iter().position(|&i| i == next) {
                ex.list_selected = pos;
            }
        }
    }

    fn edit_input(&mut self, f: impl FnOnce(&mut String)) {
        match self.input_mode {
            InputMode::Location => f(&mut self.location_input),
            InputMode::Search => {
                f(&mut self.explorer.search);
                self.refilter();
            }
            InputMode::Prompt => f(&mut self.generator.prompt),
            InputMode::Normal | InputMode::Picker => {}
        }
    }

    fn submit_input(&mut self) -> Vec<Effect> {
        match self.input_mode {
            InputMode::Location => {
                let prev = self.nav.view();
                let route = Route::parse(&self.location_input);
                self.location_input.clear();
                self.input_mode = InputMode::Normal;
                self.nav.navigate(route, &self.projection.artists);
                self.after_navigation(prev)
            }
            InputMode::Picker => self.confirm_picker(),
            InputMode::Search | InputMode::Prompt => {
                self.input_mode = InputMode::Normal;
                Vec::new()
            }
            InputMode::Normal => Vec::new(),
        }
    }

    fn select_artist(&mut self, name: &str) -> Vec<Effect> {
        let prev = self.nav.view();
        self.nav.select(name);
        self.after_navigation(prev)
    }

    fn step_artist(&mut self, delta: isize) -> Vec<Effect> {
        if !self.nav.view().shows_artist_selector() {
            return Vec::new();
        }
        let artists = &self.projection.artists;
        let Some(current) = self.displayed_artist() else {
            return Vec::new();
        };
        let pos = artists.iter().position(|a| a == current).unwrap_or(0);
        let next = pos.saturating_add_signed(delta).min(artists.len().saturating_sub(1));
        if next == pos {
            return Vec::new();
        }
        let name = artists[next].clone();
        self.select_artist(&name)
    }

    fn open_picker(&mut self) {
        let view = self.nav.view();
        if self.projection.artists.is_empty() || !(view.shows_artist_selector() || view == View::Generator) {
            return;
        }
        self.picker.selected = if view == View::Generator {
            self.generator.artist.unwrap_or(0)
        } else {
            self.displayed_artist()
                .and_then(|a| self.projection.artists.iter().position(|x| x == a))
                .unwrap_or(0)
        };
        self.input_mode = InputMode::Picker;
    }

    fn confirm_picker(&mut self) -> Vec<Effect> {
        self.input_mode = InputMode::Normal;
        let Some(name) = self.projection.artists.get(self.picker.selected).cloned() else {
            return Vec::new();
        };
        if self.nav.view() == View::Generator {
            self.generator.artist = Some(self.picker.selected);
            return Vec::new();
        }
        self.select_artist(&name)
    }

    fn move_list(&mut self, delta: isize) -> Vec<Effect> {
        fn step(pos: usize, delta: isize, len: usize) -> usize {
            pos.saturating_add_signed(delta).min(len.saturating_sub(1))
        }
        match self.nav.view() {
            View::GlobalStats => {
                let len = self.projection.global_stats.len();
                self.global_scroll = step(self.global_scroll, delta, len);
            }
            View::ArtistStats => {
                let len = self.stats.words_to_show.get();
                self.stats.words_scroll = step(self.stats.words_scroll, delta, len);
            }
            View::Dataset => {
                let len = self.explorer.filtered.len();
                self.explorer.list_selected = step(self.explorer.list_selected, delta, len);
            }
            View::Generator => {
                self.generator.focus = if delta < 0 {
                    self.generator.focus.prev()
                } else {
                    self.generator.focus.next()
                };
            }
            View::Home => {}
        }
        Vec::new()
    }

    fn cycle_option(&mut self, delta: isize) {
        let g = &mut self.generator;
        match g.focus {
            GeneratorField::Model if !g.models.is_empty() => {
                let n = g.models.len() as isize;
                g.model = (g.model as isize + delta).rem_euclid(n) as usize;
            }
            GeneratorField::Artist if !self.projection.artists.is_empty() => {
                let n = self.projection.artists.len() as isize;
                g.artist = Some(match g.artist {
                    Some(i) => (i as isize + delta).rem_euclid(n) as usize,
                    None => 0,
                });
            }
            _ => {}
        }
    }

    fn generate(&mut self) -> Vec<Effect> {
        if self.nav.view() != View::Generator {
            return Vec::new();
        }
        if !self.generator.can_generate() {
            self.toast = Some(Toast::error(match self.generator.availability {
                Availability::Checking => "Still checking the generation service",
                Availability::Unavailable => "Generation service unavailable",
                Availability::Available if self.generator.in_flight.is_some() => "Already generating",
                Availability::Available => "Choose an artist first",
            }));
            return Vec::new();
        }
        let (Some(artist), Some(model)) = (
            self.generator.artist.and_then(|i| self.projection.artists.get(i)).cloned(),
            self.generator.model_choice().map(str::to_string),
        ) else {
            return Vec::new();
        };

        let g = &mut self.generator;
        g.last_ticket += 1;
        g.in_flight = Some(g.last_ticket);
        g.result = None;
        g.error = None;
        vec![Effect::Generate {
            ticket: g.last_ticket,
            request: GenerationRequest {
                model_choice: model,
                artist,
                initial_prompt: g.prompt.clone(),
            },
        }]
    }

    fn check_availability(&mut self) -> Effect {
        self.generator.probe += 1;
        self.generator.availability = Availability::Checking;
        Effect::CheckAvailability {
            ticket: self.generator.probe,
        }
    }

    /// Words offered as highlight tags for the shown artist.
    pub fn highlight_candidates(&self) -> Vec<String> {
        self.displayed_record()
            .map(|(_, r)| {
                top_words(r, HIGHLIGHT_CANDIDATES)
                    .into_iter()
                    .map(|w| w.word.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::record;
    use crate::dataset::{ArtistDataset, DatasetSource, Generation, Song};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn dataset() -> ArtistDataset {
        let mut ds = ArtistDataset::new();
        let mut zeta = record(&[("sol", 4), ("mar", 9)], 3);
        zeta.url_dataset = Some("songs/zeta.json".into());
        zeta.generations = vec![
            Generation { title: "1".into(), text: "uno".into() },
            Generation { title: "2".into(), text: "dos".into() },
        ];
        ds.insert("Zeta".into(), zeta);
        let mut alfa = record(&[("amor", 3), ("vida", 2)], 1);
        alfa.url_dataset = Some("songs/alfa.json".into());
        ds.insert("Alfa".into(), alfa);
        ds.insert("Sin Canciones".into(), record(&[("x", 1)], 0));
        ds
    }

    fn songs(names: &[&str]) -> Arc<Vec<Song>> {
        Arc::new(
            names
                .iter()
                .map(|n| Song {
                    name: n.to_string(),
                    lyric: format!("letra de {n}"),
                })
                .collect(),
        )
    }

    fn state_at(location: &str) -> AppState {
        let source = DatasetSource::File(PathBuf::from("data/artist_analysis_data.json"));
        let mut state = AppState::new(source, Route::parse(location), 4);
        state.generator.models = vec!["m1".into(), "m2".into()];
        state
    }

    fn loaded_at(location: &str) -> (AppState, Vec<Effect>) {
        let mut state = state_at(location);
        state.start();
        let effects = state.on_network(NetworkEvent::DatasetLoaded(Ok(dataset())));
        (state, effects)
    }

    fn availability(state: &mut AppState, up: bool) {
        let ticket = state.generator.probe;
        state.on_network(NetworkEvent::Availability { ticket, up });
    }

    fn song_ticket(effects: &[Effect]) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::LoadSongs { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .expect("songs requested")
    }

    #[test]
    fn test_start_requests_dataset_and_probe() {
        let mut state = state_at("/");
        let effects = state.start();
        assert_eq!(effects.len(), 2);
        assert!(matches!(effects[0], Effect::LoadDataset(_)));
        assert_eq!(effects[1], Effect::CheckAvailability { ticket: 1 });
        assert!(state.dataset.is_loading());
    }

    #[test]
    fn test_failed_dataset_leaves_artists_empty() {
        let mut state = state_at("/estadisticas");
        state.start();
        state.on_network(NetworkEvent::DatasetLoaded(Err("HTTP error! status: 500".into())));
        assert!(!state.dataset.is_loading());
        assert!(state.artists().is_empty());
        assert_eq!(state.dataset.error(), Some("HTTP error! status: 500"));

        // A late duplicate completion changes nothing.
        state.on_network(NetworkEvent::DatasetLoaded(Ok(dataset())));
        assert!(state.artists().is_empty());
    }

    #[test]
    fn test_load_defaults_artist_and_rewrites_location() {
        let (state, _) = loaded_at("/estadisticas");
        assert_eq!(state.artists(), ["Alfa", "Sin Canciones", "Zeta"]);
        assert_eq!(state.nav.route().to_string(), "/estadisticas/alfa");
        assert_eq!(state.nav.history().len(), 1);
    }

    #[test]
    fn test_stats_index_selects_generation() {
        let (state, _) = loaded_at("/estadisticas/zeta/2");
        assert_eq!(state.displayed_artist(), Some("Zeta"));
        assert_eq!(state.stats.generation, 1);

        let (state, _) = loaded_at("/estadisticas/zeta/9");
        assert_eq!(state.stats.generation, 0);
    }

    #[test]
    fn test_next_artist_pushes_location() {
        let (mut state, _) = loaded_at("/estadisticas");
        state.apply(Action::NextArtist);
        assert_eq!(state.nav.route().to_string(), "/estadisticas/sin-canciones");
        assert_eq!(state.nav.selected_artist(), Some("Sin Canciones"));
        assert_eq!(state.nav.history().len(), 2);

        state.apply(Action::Back);
        assert_eq!(state.displayed_artist(), Some("Alfa"));
    }

    #[test]
    fn test_highlight_tags_reset_on_artist_change() {
        let (mut state, _) = loaded_at("/estadisticas/zeta");
        assert_eq!(state.highlight_candidates(), vec!["mar", "sol"]);
        state.apply(Action::TagRight);
        state.apply(Action::ToggleTag);
        assert_eq!(state.stats.highlighted, vec!["sol"]);
        state.apply(Action::ToggleTag);
        assert!(state.stats.highlighted.is_empty());

        state.apply(Action::ToggleTag);
        state.apply(Action::PrevArtist);
        assert_eq!(state.displayed_artist(), Some("Sin Canciones"));
        assert!(state.stats.highlighted.is_empty());
        assert_eq!(state.stats.tag_cursor, 0);
    }

    #[test]
    fn test_explorer_loads_and_caches_songs() {
        let (mut state, effects) = loaded_at("/dataset/zeta/2");
        let ticket = song_ticket(&effects);
        let Effect::LoadSongs { source, .. } = &effects[0] else {
            panic!("expected song load");
        };
        assert_eq!(
            *source,
            DatasetSource::File(PathBuf::from("data/songs/zeta.json"))
        );

        state.on_network(NetworkEvent::SongsLoaded {
            ticket,
            key: source.key(),
            result: Ok(songs(&["a", "b", "c"])),
        });
        assert_eq!(state.explorer.current, Some(1));
        assert_eq!(state.explorer.current_song().map(|s| s.name.as_str()), Some("b"));

        // Away to an artist without songs and back: served from the cache.
        state.apply(Action::PrevArtist);
        assert!(state.explorer.songs.error().is_some());
        let effects = state.apply(Action::NextArtist);
        assert!(effects.is_empty());
        assert_eq!(state.nav.route().to_string(), "/dataset/zeta/2");
        assert_eq!(state.explorer.song_list().len(), 3);
        assert_eq!(state.explorer.current, Some(1));
    }

    #[test]
    fn test_explorer_out_of_range_index_selects_nothing() {
        let (mut state, effects) = loaded_at("/dataset/zeta/7");
        let ticket = song_ticket(&effects);
        state.on_network(NetworkEvent::SongsLoaded {
            ticket,
            key: "k".into(),
            result: Ok(songs(&["a"])),
        });
        assert_eq!(state.explorer.current, None);
    }

    #[test]
    fn test_stale_song_list_is_dropped() {
        let (mut state, effects) = loaded_at("/dataset/zeta");
        let stale = song_ticket(&effects);

        state.apply(Action::OpenArtistPicker);
        assert_eq!(state.picker.selected, 2);
        state.apply(Action::PickerUp);
        state.apply(Action::PickerUp);
        let effects = state.apply(Action::PickerConfirm);
        assert_eq!(state.displayed_artist(), Some("Alfa"));
        let fresh = song_ticket(&effects);
        assert_ne!(stale, fresh);

        state.on_network(NetworkEvent::SongsLoaded {
            ticket: stale,
            key: "zeta".into(),
            result: Ok(songs(&["zeta song"])),
        });
        assert!(state.explorer.songs.is_loading());

        state.on_network(NetworkEvent::SongsLoaded {
            ticket: fresh,
            key: "alfa".into(),
            result: Ok(songs(&["mine"])),
        });
        assert_eq!(state.explorer.song_list()[0].name, "mine");
    }

    #[test]
    fn test_missing_dataset_url_is_local_error() {
        let (state, effects) = loaded_at("/dataset/sin-canciones");
        assert!(effects.is_empty());
        assert_eq!(
            state.explorer.songs.error(),
            Some("no dataset URL provided for this artist")
        );
        assert_eq!(state.artists().len(), 3);
    }

    #[test]
    fn test_failed_song_list_leaves_other_views() {
        let (mut state, effects) = loaded_at("/dataset/zeta");
        let ticket = song_ticket(&effects);
        state.on_network(NetworkEvent::SongsLoaded {
            ticket,
            key: "k".into(),
            result: Err("HTTP error! status: 404".into()),
        });
        assert_eq!(state.explorer.songs.error(), Some("HTTP error! status: 404"));
        assert_eq!(state.artists().len(), 3);

        state.apply(Action::OpenView(View::ArtistStats));
        assert_eq!(state.displayed_record().map(|(n, _)| n), Some("Zeta"));
    }

    #[test]
    fn test_search_filters_and_navigation() {
        let (mut state, effects) = loaded_at("/dataset/zeta");
        let ticket = song_ticket(&effects);
        state.on_network(NetworkEvent::SongsLoaded {
            ticket,
            key: "k".into(),
            result: Ok(songs(&["uno", "dos", "tres"])),
        });

        state.apply(Action::StartSearch);
        assert_eq!(state.input_mode, InputMode::Search);
        for c in "DOS".chars() {
            state.apply(Action::InputChar(c));
        }
        assert_eq!(state.explorer.filtered, vec![1]);
        state.apply(Action::SubmitInput);
        state.apply(Action::OpenSong);
        assert_eq!(state.explorer.current, Some(1));

        state.apply(Action::NextSong);
        state.apply(Action::NextSong);
        assert_eq!(state.explorer.current, Some(2));
        state.apply(Action::PrevSong);
        assert_eq!(state.explorer.current, Some(1));
    }

    #[test]
    fn test_location_input_navigates() {
        let (mut state, _) = loaded_at("/");
        state.apply(Action::StartLocationInput);
        state.apply(Action::ClearInput);
        for c in "#/estadisticas/zeta".chars() {
            state.apply(Action::InputChar(c));
        }
        state.apply(Action::SubmitInput);
        assert_eq!(state.nav.view(), View::ArtistStats);
        assert_eq!(state.nav.selected_artist(), Some("Zeta"));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_generate_disabled_when_unavailable() {
        let (mut state, _) = loaded_at("/generar-letra");
        availability(&mut state, false);
        state.generator.artist = Some(0);
        assert!(!state.generator.can_generate());
        assert!(state.apply(Action::Generate).is_empty());
        assert!(state.toast.is_some());
    }

    #[test]
    fn test_late_startup_check_is_ignored() {
        let mut state = state_at("/");
        state.start();
        state.on_network(NetworkEvent::DatasetLoaded(Ok(dataset())));
        let effects = state.apply(Action::OpenView(View::Generator));
        assert_eq!(effects, vec![Effect::CheckAvailability { ticket: 2 }]);

        state.on_network(NetworkEvent::Availability { ticket: 2, up: true });
        // The startup check times out after the newer one answered.
        state.on_network(NetworkEvent::Availability { ticket: 1, up: false });
        assert_eq!(state.generator.availability, Availability::Available);
    }

    #[test]
    fn test_generate_requires_artist() {
        let (mut state, _) = loaded_at("/generar-letra");
        availability(&mut state, true);
        assert!(state.apply(Action::Generate).is_empty());

        state.generator.focus = GeneratorField::Artist;
        state.apply(Action::OptionNext);
        assert_eq!(state.generator.artist, Some(0));
        let effects = state.apply(Action::Generate);
        let Some(Effect::Generate { request, .. }) = effects.first() else {
            panic!("expected a generation request");
        };
        assert_eq!(request.artist, "Alfa");
        assert_eq!(request.model_choice, "m1");
        assert!(!state.generator.can_generate());
    }

    #[test]
    fn test_generation_result_and_stale_drop() {
        let (mut state, _) = loaded_at("/generar-letra");
        availability(&mut state, true);
        state.generator.artist = Some(2);

        let Some(Effect::Generate { ticket, .. }) = state.apply(Action::Generate).pop() else {
            panic!("expected a generation request");
        };
        // Leaving the page abandons the request.
        state.apply(Action::OpenView(View::Home));
        state.on_network(NetworkEvent::Generated {
            ticket,
            result: Ok("tarde".into()),
        });
        assert!(state.generator.result.is_none());

        let effects = state.apply(Action::OpenView(View::Generator));
        assert_eq!(effects, vec![Effect::CheckAvailability { ticket: 2 }]);
        availability(&mut state, true);
        let Some(Effect::Generate { ticket, .. }) = state.apply(Action::Generate).pop() else {
            panic!("expected a generation request");
        };
        state.on_network(NetworkEvent::Generated {
            ticket,
            result: Err("boom".into()),
        });
        assert_eq!(
            state.generator.error.as_deref(),
            Some("Failed to generate lyrics: boom")
        );
        assert!(state.generator.can_generate());
    }

    #[test]
    fn test_reload_resets_views() {
        let (mut state, _) = loaded_at("/estadisticas/zeta");
        let effects = state.apply(Action::Reload);
        assert!(matches!(effects[..], [Effect::LoadDataset(_)]));
        assert!(state.dataset.is_loading());
        assert!(state.apply(Action::Reload).is_empty());

        state.on_network(NetworkEvent::DatasetLoaded(Ok(dataset())));
        assert_eq!(state.nav.route().to_string(), "/estadisticas/zeta");
    }
}
