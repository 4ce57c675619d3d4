use crate::dataset::{ArtistDataset, DatasetSource, Song};
use crate::generation::GenerationRequest;
use std::sync::Arc;

#[derive(Debug)]
pub enum Event {
    Input(InputEvent),
    Network(NetworkEvent),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

#[derive(Debug)]
pub enum NetworkEvent {
    DatasetLoaded(Result<ArtistDataset, String>),
    SongsLoaded {
        ticket: u64,
        key: String,
        result: Result<Arc<Vec<Song>>, String>,
    },
    Availability {
        ticket: u64,
        up: bool,
    },
    Generated {
        ticket: u64,
        result: Result<String, String>,
    },
}

/// Work the state machine asks the shell to start.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadDataset(DatasetSource),
    LoadSongs { ticket: u64, source: DatasetSource },
    CheckAvailability { ticket: u64 },
    Generate { ticket: u64, request: GenerationRequest },
}
