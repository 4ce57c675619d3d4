//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

/// Icon set using Nerd Font glyphs
#[derive(Debug, Clone)]
pub struct Icons {
    // Views
    pub home: &'static str,
    pub stats: &'static str,
    pub global: &'static str,
    pub dataset: &'static str,
    pub generator: &'static str,
    pub help: &'static str,

    // Status
    pub error: &'static str,
    pub info: &'static str,

    // Content
    pub artist: &'static str,
    pub search: &'static str,
    pub lyrics: &'static str,
    pub link: &'static str,

    // Location bar
    pub back: &'static str,
    pub forward: &'static str,

    // Selection
    pub selected: &'static str,
    pub unselected: &'static str,

    pub bar: &'static str,
}

impl Icons {
    /// Nerd Font icon set
    pub const fn nerd() -> Self {
        Self {
            home: "\u{f015}",           // nf-fa-home
            stats: "\u{f080}",          // nf-fa-bar_chart
            global: "\u{f0ac}",         // nf-fa-globe
            dataset: "\u{f1c0}",        // nf-fa-database
            generator: "\u{f040}",      // nf-fa-pencil
            help: "\u{f059}",           // nf-fa-question_circle

            error: "\u{f00d}",          // nf-fa-times
            info: "\u{f05a}",           // nf-fa-info_circle

            artist: "\u{f007}",         // nf-fa-user
            search: "\u{f002}",         // nf-fa-search
            lyrics: "\u{f15c}",         // nf-fa-file_text_o
            link: "\u{f0c1}",           // nf-fa-link

            back: "\u{f053}",           // nf-fa-chevron_left
            forward: "\u{f054}",        // nf-fa-chevron_right

            selected: "\u{f054}",       // nf-fa-chevron_right
            unselected: " ",

            bar: "█",
        }
    }

    pub fn for_view(&self, view: crate::routing::View) -> &'static str {
        use crate::routing::View;
        match view {
            View::Home => self.home,
            View::ArtistStats => self.stats,
            View::GlobalStats => self.global,
            View::Dataset => self.dataset,
            View::Generator => self.generator,
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}

/// Loading spinner frames
pub struct LoadingSpinner;

impl LoadingSpinner {
    /// Braille-based smooth spinner
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    pub fn frame(tick: u64) -> &'static str {
        let idx = tick as usize % Self::BRAILLE.len();
        Self::BRAILLE[idx]
    }
}
