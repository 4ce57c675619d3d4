//! Dataset explorer: per-artist song list, lyric search and lyric viewer.

use crate::analysis::text::{find_matches, snippet, SNIPPET_RADIUS};
use crate::app::state::{AppState, InputMode};
use crate::dataset::Loadable;
use crate::tui::theme::{get_theme, Theme};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let [selector, body] = Layout::vertical([Constraint::Length(2), Constraint::Min(4)]).areas(area);
    frame.render_widget(Paragraph::new(super::artist_selector_line(state, &theme)), selector);

    if state.displayed_record().is_none() {
        super::render_message(frame, body, Line::styled("No artists in the dataset.", theme.muted()));
        return;
    }

    match &state.explorer.songs {
        Loadable::Idle | Loadable::Loading => super::render_loading(frame, state, body, "songs"),
        Loadable::Failed(e) => super::render_error(frame, body, &format!("Error loading songs: {e}")),
        Loadable::Ready(_) => {
            let [left, right] =
                Layout::horizontal([Constraint::Percentage(38), Constraint::Percentage(62)]).areas(body);
            let [search, list] = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(left);
            render_search(frame, state, &theme, search);
            render_list(frame, state, &theme, list);
            render_lyric(frame, state, &theme, right);
        }
    }
}

fn render_search(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let ex = &state.explorer;
    let editing = state.input_mode == InputMode::Search;

    let title = format!(
        " {} Search ({} of {}) ",
        theme.icons.search,
        ex.filtered.len(),
        ex.song_list().len()
    );
    let line = if editing {
        Line::from(vec![
            Span::styled(ex.search.clone(), theme.strong()),
            Span::styled("█", Style::default().fg(theme.palette.accent)),
        ])
    } else if ex.search.is_empty() {
        Line::styled("/ to search lyrics", theme.muted())
    } else {
        Line::raw(ex.search.clone())
    };
    frame.render_widget(Paragraph::new(line).block(theme.panel(title)), area);
}

fn render_list(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let ex = &state.explorer;
    let songs = ex.song_list();
    let block = theme.panel(" Songs ");

    if ex.filtered.is_empty() {
        let msg = if songs.is_empty() { "No songs for this artist." } else { "No song matches the search." };
        frame.render_widget(Paragraph::new(Line::styled(msg, theme.muted())).block(block), area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = ex
        .filtered
        .iter()
        .filter_map(|&i| songs.get(i).map(|s| (i, s)))
        .map(|(i, song)| {
            let open = ex.current == Some(i);
            let style = if open { theme.strong() } else { Style::default().fg(theme.palette.fg_primary) };
            let mut lines = vec![Line::styled(
                super::truncate_str(&format!("{}. {}", i + 1, song.name), width),
                style,
            )];
            if let Some(snip) = snippet(&song.lyric, &ex.search, SNIPPET_RADIUS) {
                let flat = snip.text.replace('\n', " ");
                let mut marked = super::marked_lines(&flat, &snip.matches, theme);
                if let Some(line) = marked.pop() {
                    lines.push(line.style(theme.muted()));
                }
            }
            ListItem::new(Text::from(lines))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(ex.list_selected.min(ex.filtered.len() - 1)));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.palette.bg_highlight))
        .highlight_symbol(theme.icons.selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_lyric(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let ex = &state.explorer;
    let Some(song) = ex.current_song() else {
        let block = theme.panel(format!(" {} Lyric ", theme.icons.lyrics));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        super::render_message(frame, inner, Line::styled("Select a song with Enter.", theme.muted()));
        return;
    };

    let position = ex.current.map(|i| i + 1).unwrap_or(0);
    let title = format!(
        " {} {} ({}/{}) ",
        theme.icons.lyrics,
        song.name,
        position,
        ex.song_list().len()
    );
    let ranges = find_matches(&song.lyric, &ex.search);
    let lines = super::marked_lines(&song.lyric, &ranges, theme);

    let paragraph = Paragraph::new(lines)
        .block(theme.panel(title))
        .wrap(Wrap { trim: false })
        .scroll((ex.lyric_scroll, 0));
    frame.render_widget(paragraph, area);
}
