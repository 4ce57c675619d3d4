//! Artist picker popup

use crate::app::state::AppState;
use crate::tui::theme::get_theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let artists = state.artists();

    let height = (artists.len() as u16).saturating_add(2).min(area.height.saturating_sub(2)).max(3);
    let popup = super::centered_rect(area, 40, height);
    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = artists
        .iter()
        .map(|name| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", theme.icons.artist), theme.muted()),
                Span::raw(name.clone()),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.picker.selected));

    let list = List::new(items)
        .block(theme.panel(" Select an artist "))
        .highlight_style(theme.cursor())
        .highlight_symbol("");
    frame.render_stateful_widget(list, popup, &mut list_state);
}
