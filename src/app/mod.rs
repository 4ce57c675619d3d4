pub mod actions;
pub mod events;
pub mod state;
mod update;

use crate::config::Config;
use crate::dataset::{DatasetLoader, DatasetSource};
use crate::generation::GradioClient;
use crate::input;
use crate::routing::Route;
use crate::tui::{self, TuiTerminal};
use events::{Effect, Event, NetworkEvent};
use state::{AppState, Toast};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct App {
    cfg: Config,
    config_path: PathBuf,
    state: AppState,
    loader: DatasetLoader,
    gradio: GradioClient,
}

impl App {
    pub fn new(cfg: Config, config_path: PathBuf, source: DatasetSource, location: Option<String>) -> anyhow::Result<Self> {
        let loader = DatasetLoader::new()?;
        let gradio = GradioClient::new(&cfg.generation)?;

        // Explicit location first, then wherever the last session ended.
        let initial = location
            .as_deref()
            .or(cfg.ui.last_location.as_deref())
            .map(Route::parse)
            .unwrap_or_else(Route::home);

        let mut state = AppState::new(source, initial, cfg.data.song_cache_size);
        state.stats.words_to_show = crate::analysis::WordsToShow::new(cfg.ui.words_to_show);
        state.generator.models = cfg.generation.models.clone();
        state.generator.status_page = gradio.status_page();

        Ok(Self {
            cfg,
            config_path,
            state,
            loader,
            gradio,
        })
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.input.mouse);

        tui::draw(terminal, &self.state)?;

        let effects = self.state.start();
        self.execute(effects, &tx);

        while let Some(ev) = rx.recv().await {
            let effects = match ev {
                Event::Input(input_ev) => match input::map_input_to_action(&self.state, input_ev) {
                    Some(action) => self.state.apply(action),
                    None => Vec::new(),
                },
                Event::Network(ne) => self.state.on_network(ne),
            };
            self.execute(effects, &tx);

            if self.state.should_quit {
                break;
            }

            if self.state.toast.as_ref().is_some_and(Toast::is_expired) {
                self.state.toast = None;
            }
            self.state.tick = self.state.tick.wrapping_add(1);
            tui::draw(terminal, &self.state)?;
        }

        self.save_state_on_quit();
        Ok(())
    }

    fn save_state_on_quit(&mut self) {
        self.cfg.ui.last_location = Some(self.state.nav.route().to_string());
        self.cfg.ui.words_to_show = self.state.stats.words_to_show.get();
        if let Err(e) = crate::config::save(&self.cfg, Some(&self.config_path)) {
            tracing::warn!("failed to save config: {e:#}");
        }
    }

    fn execute(&self, effects: Vec<Effect>, tx: &mpsc::Sender<Event>) {
        for effect in effects {
            match effect {
                Effect::LoadDataset(source) => self.spawn_load_dataset(source, tx),
                Effect::LoadSongs { ticket, source } => self.spawn_load_songs(ticket, source, tx),
                Effect::CheckAvailability { ticket } => self.spawn_check_availability(ticket, tx),
                Effect::Generate { ticket, request } => {
                    let gradio = self.gradio.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let result = gradio.generate(&request).await.map_err(|e| {
                            tracing::warn!("generation failed: {e}");
                            e.to_string()
                        });
                        let _ = tx
                            .send(Event::Network(NetworkEvent::Generated { ticket, result }))
                            .await;
                    });
                }
            }
        }
    }

    fn spawn_load_dataset(&self, source: DatasetSource, tx: &mpsc::Sender<Event>) {
        let loader = self.loader.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = loader.load_dataset(&source).await.map_err(|e| e.to_string());
            let _ = tx.send(Event::Network(NetworkEvent::DatasetLoaded(result))).await;
        });
    }

    fn spawn_load_songs(&self, ticket: u64, source: DatasetSource, tx: &mpsc::Sender<Event>) {
        let loader = self.loader.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let key = source.key();
            let result = loader
                .load_songs(&source)
                .await
                .map(Arc::new)
                .map_err(|e| e.to_string());
            let _ = tx
                .send(Event::Network(NetworkEvent::SongsLoaded { ticket, key, result }))
                .await;
        });
    }

    fn spawn_check_availability(&self, ticket: u64, tx: &mpsc::Sender<Event>) {
        let gradio = self.gradio.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let up = gradio.check_availability().await;
            let _ = tx.send(Event::Network(NetworkEvent::Availability { ticket, up })).await;
        });
    }
}
