//! Theme configuration - Monochrome grayscale

pub mod icons;
pub mod palette;

pub use icons::{Icons, LoadingSpinner};
pub use palette::Palette;

use ratatui::{
    style::{Modifier, Style},
    symbols::border,
    widgets::{Block, Borders},
};

/// Active theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub icons: Icons,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::MONO,
            icons: Icons::nerd(),
        }
    }

    /// Rounded, dim-bordered panel with an accent title.
    pub fn panel(&self, title: impl Into<String>) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(self.palette.border))
            .title(title.into())
            .title_style(Style::default().fg(self.palette.accent))
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.palette.fg_secondary)
    }

    pub fn strong(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Inverted style for the row under the cursor.
    pub fn cursor(&self) -> Style {
        Style::default()
            .fg(self.palette.bg_primary)
            .bg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Marked text inside a lyric (search hits, highlighted words).
    pub fn mark(&self) -> Style {
        Style::default()
            .bg(self.palette.bg_highlight)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the theme (always Mono)
pub fn get_theme() -> Theme {
    Theme::new()
}
