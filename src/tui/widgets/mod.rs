pub mod artist_stats;
pub mod explorer;
pub mod generator;
pub mod global_stats;
pub mod help;
pub mod home;
pub mod picker;
pub mod root;
pub mod sidebar;

use crate::analysis::text::split_highlighted;
use crate::app::state::AppState;
use crate::tui::theme::{LoadingSpinner, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use std::ops::Range;

pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let char_count: usize = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// A `width` x `height` box centred in `area`.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

pub(crate) fn render_message(frame: &mut Frame, area: Rect, line: Line<'static>) {
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

pub(crate) fn render_loading(frame: &mut Frame, state: &AppState, area: Rect, what: &str) {
    let theme = crate::tui::theme::get_theme();
    let spinner = LoadingSpinner::frame(state.tick);
    render_message(
        frame,
        area,
        Line::styled(format!("{spinner} Loading {what}..."), theme.muted()),
    );
}

pub(crate) fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let theme = crate::tui::theme::get_theme();
    render_message(
        frame,
        area,
        Line::from(vec![
            Span::styled(format!("{} ", theme.icons.error), theme.strong()),
            Span::styled(message.to_string(), theme.strong()),
        ]),
    );
}

/// `◂ Artist ▸` header shared by the views that carry an artist.
pub(crate) fn artist_selector_line(state: &AppState, theme: &Theme) -> Line<'static> {
    let artists = state.artists();
    let name = state.displayed_artist().unwrap_or("-").to_string();
    let pos = artists
        .iter()
        .position(|a| *a == name)
        .map(|i| format!("  {}/{}", i + 1, artists.len()))
        .unwrap_or_default();
    Line::from(vec![
        Span::styled(format!("{} ", theme.icons.artist), theme.muted()),
        Span::styled("[ ", theme.muted()),
        Span::styled(name, theme.strong()),
        Span::styled(" ]", theme.muted()),
        Span::styled(pos, theme.muted()),
        Span::styled("   [/] prev/next  a pick", theme.muted()),
    ])
}

/// Lines of `text` with `ranges` (byte ranges into `text`) marked.
pub(crate) fn marked_lines(text: &str, ranges: &[Range<usize>], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    for (piece, marked) in split_highlighted(text, ranges) {
        let style = if marked { theme.mark() } else { Default::default() };
        let mut parts = piece.split('\n');
        if let Some(first) = parts.next()
            && !first.is_empty()
            && let Some(last) = lines.last_mut()
        {
            last.push_span(Span::styled(first.to_string(), style));
        }
        for rest in parts {
            let mut line = Line::default();
            if !rest.is_empty() {
                line.push_span(Span::styled(rest.to_string(), style));
            }
            lines.push(line);
        }
    }
    lines
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("corazón", 10), "corazón");
        assert_eq!(truncate_str("corazón partido", 8), "coraz...");
        assert_eq!(truncate_str("abc", 0), "");
    }

    #[test]
    fn test_marked_lines_splits_newlines() {
        let theme = Theme::new();
        let text = "hola amor\nadios amor";
        let lines = marked_lines(text, &[5..9, 16..20], &theme);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[1].content, "amor");
        assert_eq!(lines[1].spans[1].content, "amor");
        assert_eq!(lines[1].spans[1].style, theme.mark());
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        let r = centered_rect(area, 10, 4);
        assert_eq!((r.x, r.y, r.width, r.height), (5, 3, 10, 4));
        let r = centered_rect(area, 50, 50);
        assert_eq!((r.width, r.height), (20, 10));
    }
}
