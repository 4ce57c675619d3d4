use crate::app::state::AppState;
use crate::routing::View;
use crate::tui::theme::get_theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

/// Tab list. Each entry shows the number key that opens it.
pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;
    let current = state.nav.view();

    let block = theme.panel(" Views ");

    let items: Vec<ListItem> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let is_selected = *view == current;

            let style = if is_selected {
                theme.strong()
            } else {
                Style::default().fg(theme.palette.fg_primary)
            };

            let icon_style = if is_selected {
                Style::default().fg(theme.palette.accent)
            } else {
                theme.muted()
            };

            let prefix = if is_selected { icons.selected } else { icons.unselected };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, icon_style),
                Span::styled(format!(" {} ", i + 1), theme.muted()),
                Span::styled(icons.for_view(*view), icon_style),
                Span::raw(" "),
                Span::styled(view.label(), style),
            ]))
        })
        .collect();

    let selected = View::ALL.iter().position(|v| *v == current);
    let mut list_state = ListState::default();
    list_state.select(selected);

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.palette.bg_highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("");

    frame.render_stateful_widget(list, area, &mut list_state);
}
