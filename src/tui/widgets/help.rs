//! Help overlay showing keybindings

use crate::app::state::AppState;
use crate::tui::theme::{get_theme, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

/// Render the help popup over `area`
pub fn render(frame: &mut Frame, _state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let popup = super::centered_rect(area, 90, 30);
    frame.render_widget(Clear, popup);

    let block = theme.panel(format!(" {} Keybinds (any key to close) ", icons.help));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    // Split into columns
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left_content = vec![
        section_header("Navigation", &theme),
        keybind("1-5", "Open view", &theme),
        keybind("Tab / S-Tab", "Next / previous view", &theme),
        keybind(", / Alt+Left", "Back", &theme),
        keybind(". / Alt+Right", "Forward", &theme),
        keybind(":", "Type a location", &theme),
        keybind("j / Down", "Move down", &theme),
        keybind("k / Up", "Move up", &theme),
        keybind("g / G", "Top / bottom", &theme),
        keybind("Ctrl+d / u", "Page down / up", &theme),
        Line::default(),
        section_header("Artist", &theme),
        keybind("[ / ]", "Previous / next artist", &theme),
        keybind("a", "Pick an artist", &theme),
        Line::default(),
        section_header("General", &theme),
        keybind("Ctrl+r", "Reload data", &theme),
        keybind("?", "Toggle this help", &theme),
        keybind("q / Esc", "Quit", &theme),
    ];

    let left_para = Paragraph::new(left_content).wrap(Wrap { trim: false });
    frame.render_widget(left_para, cols[0]);

    let right_content = vec![
        section_header("Artist stats", &theme),
        keybind("+ / -", "More / fewer words", &theme),
        keybind("n / p", "Next / previous generation", &theme),
        keybind("w / W", "Next / previous word tag", &theme),
        keybind("Space", "Toggle word highlight", &theme),
        Line::default(),
        section_header("Dataset", &theme),
        keybind("/", "Search lyrics", &theme),
        keybind("Enter", "Open song", &theme),
        keybind("n / p", "Next / previous song", &theme),
        keybind("J / K", "Scroll lyric", &theme),
        Line::default(),
        section_header("Generate", &theme),
        keybind("Up / Down", "Move between fields", &theme),
        keybind("Left / Right", "Change option", &theme),
        keybind("i", "Edit prompt", &theme),
        keybind("Ctrl+g", "Generate", &theme),
    ];

    let right_para = Paragraph::new(right_content).wrap(Wrap { trim: false });
    frame.render_widget(right_para, cols[1]);
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {} ━━", title),
        theme.strong(),
    )])
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{:14}", key),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_primary)),
    ])
}
