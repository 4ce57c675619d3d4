//! Locations, history and artist selection.

pub mod history;
pub mod route;
pub mod selection;
pub mod slug;

pub use route::{Route, View};
pub use selection::Navigator;
pub use slug::{find_artist, slugify};
