//! Root layout widget - orchestrates main layout structure

use crate::app::state::{AppState, InputMode, ToastKind};
use crate::dataset::Loadable;
use crate::routing::View;
use crate::tui::theme::get_theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{artist_stats, explorer, generator, global_stats, help, home, picker, sidebar};

/// Main layout structure:
/// ┌─────────────────────────────────────────────────────┐
/// │ < >  #/estadisticas/alfa                            │
/// ├──────────┬──────────────────────────────────────────┤
/// │  Views   │           Main Content                   │
/// │          │                                          │
/// │  Home    │                                          │
/// │  Stats   │                                          │
/// │  ...     │                                          │
/// ├──────────┴──────────────────────────────────────────┤
/// │ status / toast                              ? help  │
/// └─────────────────────────────────────────────────────┘
pub fn render(frame: &mut Frame, state: &AppState) {
    let root = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Location bar
            Constraint::Min(8),    // Sidebar + content
            Constraint::Length(1), // Status line
        ])
        .split(root);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Sidebar menu
            Constraint::Min(40),    // Main content area
        ])
        .split(rows[1]);

    render_location_bar(frame, state, rows[0]);
    sidebar::render(frame, state, cols[0]);
    render_main_content(frame, state, cols[1]);
    render_status_line(frame, state, rows[2]);

    if state.input_mode == InputMode::Picker {
        picker::render(frame, state, cols[1]);
    }
    if state.show_help {
        help::render(frame, state, root);
    }
}

fn render_location_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;
    let history = state.nav.history();

    let arrow = |enabled: bool, icon: &'static str| {
        let style = if enabled { theme.strong() } else { theme.muted() };
        Span::styled(icon, style)
    };

    let editing = state.input_mode == InputMode::Location;
    let mut spans = vec![
        arrow(history.can_go_back(), icons.back),
        Span::raw(" "),
        arrow(history.can_go_forward(), icons.forward),
        Span::raw("  #"),
    ];
    if editing {
        spans.push(Span::styled(state.location_input.clone(), theme.strong()));
        spans.push(Span::styled("█", Style::default().fg(theme.palette.accent)));
    } else {
        spans.push(Span::styled(
            state.nav.route().to_string(),
            Style::default().fg(theme.palette.fg_primary),
        ));
    }

    let title = if editing { " Location (Enter go, Esc cancel) " } else { " Location " };
    let block = theme.panel(title);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Render the main content area based on the current view
fn render_main_content(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let view = state.nav.view();

    let title = format!(" {} {} ", theme.icons.for_view(view), view.label());
    let main = theme.panel(title);
    let inner = main.inner(area);
    frame.render_widget(main, area);

    if view == View::Home {
        home::render(frame, state, inner);
        return;
    }

    // Every other view needs the dataset.
    match &state.dataset {
        Loadable::Idle | Loadable::Loading => {
            super::render_loading(frame, state, inner, "data");
            return;
        }
        Loadable::Failed(e) if view != View::Generator => {
            super::render_error(frame, inner, &format!("Error loading data: {e}  (Ctrl+r to retry)"));
            return;
        }
        _ => {}
    }

    match view {
        View::Home => {}
        View::ArtistStats => artist_stats::render(frame, state, inner),
        View::GlobalStats => global_stats::render(frame, state, inner),
        View::Dataset => explorer::render(frame, state, inner),
        View::Generator => generator::render(frame, state, inner),
    }
}

fn render_status_line(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let left = match &state.toast {
        Some(toast) => {
            let (icon, style) = match toast.kind {
                ToastKind::Info => (icons.info, Style::default().fg(theme.palette.accent_alt)),
                ToastKind::Error => (icons.error, theme.strong().fg(theme.palette.error)),
            };
            Line::from(vec![
                Span::styled(format!(" {icon} "), style),
                Span::styled(toast.message.clone(), style),
            ])
        }
        None => Line::styled(format!(" {}", state.status), theme.muted()),
    };

    let hint = match state.input_mode {
        InputMode::Normal => " : location  ? help  q quit ",
        InputMode::Picker => " Enter select  Esc close ",
        _ => " Enter done  Esc cancel ",
    };
    let hint_len = hint.chars().count() as u16;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(hint_len)])
        .split(area);

    frame.render_widget(Paragraph::new(left), cols[0]);
    frame.render_widget(Paragraph::new(Line::styled(hint, theme.muted())), cols[1]);
}
