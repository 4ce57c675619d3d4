use crate::analysis::{format_thousands, GLOBAL_TOP_WORDS};
use crate::app::state::AppState;
use crate::tui::theme::get_theme;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Row, Table, TableState},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let projection = &state.projection;

    if projection.global_stats.is_empty() {
        super::render_message(frame, area, Line::styled("No artists in the dataset.", theme.muted()));
        return;
    }

    let [summary_area, words_area] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let selected = state.global_scroll.min(projection.global_stats.len() - 1);
    let highlight = Style::default().bg(theme.palette.bg_highlight);

    let rows: Vec<Row> = projection
        .global_stats
        .iter()
        .map(|(name, s)| {
            Row::new(vec![
                name.clone(),
                format_thousands(s.songs),
                format_thousands(s.total_words),
                format_thousands(s.unique_words),
                format!("{:.2}", s.avg_words_per_song),
            ])
        })
        .collect();
    let summary = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(12),
        ],
    )
    .header(Row::new(vec!["Artist", "Songs", "Total words", "Unique words", "Words/song"]).style(theme.strong()))
    .block(theme.panel(" Summary "))
    .row_highlight_style(highlight);
    let mut table_state = TableState::default();
    table_state.select(Some(selected));
    frame.render_stateful_widget(summary, summary_area, &mut table_state);

    let rows: Vec<Row> = projection
        .global_top_words
        .iter()
        .zip(&projection.global_stats)
        .map(|((name, words), (_, s))| {
            let top = if words.is_empty() {
                "N/A".to_string()
            } else {
                words
                    .iter()
                    .map(|w| format!("{}: {}", w.word, format_thousands(w.count)))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            Row::new(vec![name.clone(), format_thousands(s.songs), top])
        })
        .collect();
    let words = Table::new(
        rows,
        [Constraint::Length(24), Constraint::Length(10), Constraint::Min(20)],
    )
    .header(
        Row::new(vec![
            "Artist".to_string(),
            "Songs".to_string(),
            format!("{GLOBAL_TOP_WORDS} frequent words (word: count)"),
        ])
        .style(theme.strong()),
    )
    .block(theme.panel(format!(" Top {GLOBAL_TOP_WORDS} words per artist ")))
    .row_highlight_style(highlight);
    let mut table_state = TableState::default();
    table_state.select(Some(selected));
    frame.render_stateful_widget(words, words_area, &mut table_state);
}
