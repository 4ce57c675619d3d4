use crate::analysis::{Projection, WordsToShow};
use crate::dataset::{ArtistDataset, ArtistRecord, DatasetSource, Loadable, Song};
use crate::routing::{Navigator, Route};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a location into the location bar.
    Location,
    /// Typing a dataset search term.
    Search,
    /// Editing the generator prompt.
    Prompt,
    /// Artist picker popup open.
    Picker,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

/// Per-artist statistics page.
#[derive(Debug, Clone, Default)]
pub struct StatsState {
    /// Route the fields below were initialised from.
    pub bound_to: Option<Route>,
    pub words_to_show: WordsToShow,
    pub words_scroll: usize,
    pub generation: usize,
    pub highlighted: Vec<String>,
    pub tag_cursor: usize,
}

/// Dataset explorer page.
#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    pub bound_to: Option<Route>,
    pub songs: Loadable<Arc<Vec<Song>>>,
    /// Cache key of the resource behind `songs`.
    pub songs_key: Option<String>,
    pub ticket: u64,
    pub search: String,
    /// Indices into `songs` that match `search`.
    pub filtered: Vec<usize>,
    /// Cursor into `filtered`.
    pub list_selected: usize,
    /// Song shown in the lyric pane.
    pub current: Option<usize>,
    pub lyric_scroll: u16,
    /// 1-based song number requested by the location.
    pub initial_index: Option<usize>,
}

impl ExplorerState {
    pub fn song_list(&self) -> &[Song] {
        self.songs.ready().map(|s| s.as_slice()).unwrap_or(&[])
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current.and_then(|i| self.song_list().get(i))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Checking,
    Available,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorField {
    #[default]
    Model,
    Artist,
    Prompt,
    Submit,
}

impl GeneratorField {
    pub fn next(self) -> Self {
        match self {
            GeneratorField::Model => GeneratorField::Artist,
            GeneratorField::Artist => GeneratorField::Prompt,
            GeneratorField::Prompt => GeneratorField::Submit,
            GeneratorField::Submit => GeneratorField::Model,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            GeneratorField::Model => GeneratorField::Submit,
            GeneratorField::Artist => GeneratorField::Model,
            GeneratorField::Prompt => GeneratorField::Artist,
            GeneratorField::Submit => GeneratorField::Prompt,
        }
    }
}

/// Lyric generator page.
#[derive(Debug, Clone, Default)]
pub struct GeneratorState {
    pub availability: Availability,
    pub models: Vec<String>,
    pub model: usize,
    /// `None` until the user picks an artist.
    pub artist: Option<usize>,
    pub prompt: String,
    pub focus: GeneratorField,
    pub result: Option<String>,
    pub error: Option<String>,
    /// Ticket of the request whose answer is still wanted.
    pub in_flight: Option<u64>,
    pub last_ticket: u64,
    /// Ticket of the latest availability check; older answers are ignored.
    pub probe: u64,
    /// Where to check on the Space when it is down.
    pub status_page: String,
}

impl GeneratorState {
    pub fn can_generate(&self) -> bool {
        self.availability == Availability::Available
            && self.in_flight.is_none()
            && self.artist.is_some()
            && !self.models.is_empty()
    }

    pub fn model_choice(&self) -> Option<&str> {
        self.models.get(self.model).map(String::as_str)
    }
}

/// Artist picker popup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickerState {
    pub selected: usize,
}

pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,

    pub nav: Navigator,
    pub source: DatasetSource,
    pub dataset: Loadable<ArtistDataset>,
    pub projection: Projection,

    pub stats: StatsState,
    pub explorer: ExplorerState,
    pub generator: GeneratorState,
    pub song_cache: LruCache<String, Arc<Vec<Song>>>,

    pub input_mode: InputMode,
    pub location_input: String,
    pub picker: PickerState,
    pub global_scroll: usize,
    pub show_help: bool,

    pub toast: Option<Toast>,
    pub status: String,
}

impl AppState {
    pub fn new(source: DatasetSource, initial: Route, cache_size: usize) -> Self {
        let cap = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            should_quit: false,
            tick: 0,
            nav: Navigator::new(initial),
            source,
            dataset: Loadable::Idle,
            projection: Projection::default(),
            stats: StatsState::default(),
            explorer: ExplorerState::default(),
            generator: GeneratorState::default(),
            song_cache: LruCache::new(cap),
            input_mode: InputMode::Normal,
            location_input: String::new(),
            picker: PickerState::default(),
            global_scroll: 0,
            show_help: false,
            toast: None,
            status: String::new(),
        }
    }

    pub fn artists(&self) -> &[String] {
        &self.projection.artists
    }

    /// Artist the current view shows, resolved from the location.
    pub fn displayed_artist(&self) -> Option<&str> {
        self.nav.displayed_artist(&self.projection.artists)
    }

    pub fn displayed_record(&self) -> Option<(&str, &ArtistRecord)> {
        let name = self.displayed_artist()?;
        let record = self.dataset.ready()?.get(name)?;
        Some((name, record))
    }
}
