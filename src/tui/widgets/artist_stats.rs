//! Per-artist statistics: summary, frequent words and generated samples.

use crate::analysis::{bar_ratio, format_thousands, text::highlight_words, top_words};
use crate::app::state::AppState;
use crate::dataset::ArtistRecord;
use crate::tui::theme::{get_theme, Theme};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let [selector, body] = Layout::vertical([Constraint::Length(2), Constraint::Min(4)]).areas(area);
    frame.render_widget(Paragraph::new(super::artist_selector_line(state, &theme)), selector);

    let Some((name, record)) = state.displayed_record() else {
        super::render_message(frame, body, Line::styled("No artists in the dataset.", theme.muted()));
        return;
    };

    let [left, right] = Layout::horizontal([Constraint::Percentage(42), Constraint::Percentage(58)]).areas(body);
    let [summary, words] = Layout::vertical([Constraint::Length(6), Constraint::Min(3)]).areas(left);

    render_summary(frame, &theme, name, record, summary);
    render_words(frame, state, &theme, record, words);
    render_generations(frame, state, &theme, name, record, right);
}

fn render_summary(frame: &mut Frame, theme: &Theme, name: &str, record: &ArtistRecord, area: Rect) {
    let stats = &record.stats;
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(value),
        ])
    };
    let lines = vec![
        row("Total words", format_thousands(stats.total_words)),
        row("Unique words", format_thousands(stats.unique_words)),
        row("Songs", format_thousands(stats.songs)),
        row("Average words per song", format!("{:.2}", stats.avg_words_per_song)),
    ];
    let block = theme.panel(format!(" Stats for {name} "));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_words(frame: &mut Frame, state: &AppState, theme: &Theme, record: &ArtistRecord, area: Rect) {
    let shown = top_words(record, state.stats.words_to_show.get());
    let block = theme.panel(format!(" Frequent words ({}) +/- ", shown.len()));

    if shown.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled("No words to show.", theme.muted())).block(block),
            area,
        );
        return;
    }

    let max = shown.first().map(|w| w.count).unwrap_or(0);
    // Word and count columns plus borders and spacing.
    let bar_width = area.width.saturating_sub(2 + 16 + 8 + 2) as usize;

    let rows: Vec<Row> = shown
        .iter()
        .map(|w| {
            let filled = (bar_ratio(w.count, max) * bar_width as f64).round() as usize;
            Row::new(vec![
                Cell::from(super::truncate_str(&w.word, 16)),
                Cell::from(format_thousands(w.count)),
                Cell::from(Span::styled(
                    theme.icons.bar.repeat(filled),
                    Style::default().fg(theme.palette.accent_alt),
                )),
            ])
        })
        .collect();

    let header = Row::new(vec!["Word", "Count", "Frequency"]).style(theme.muted());
    let table = Table::new(
        rows,
        [Constraint::Length(16), Constraint::Length(8), Constraint::Min(1)],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(theme.palette.bg_highlight));

    let mut table_state = TableState::default();
    table_state.select(Some(state.stats.words_scroll.min(shown.len() - 1)));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_generations(
    frame: &mut Frame,
    state: &AppState,
    theme: &Theme,
    name: &str,
    record: &ArtistRecord,
    area: Rect,
) {
    let block = theme.panel(format!(" AI generations for {name} "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let generations = &record.generations;
    let Some(current) = generations.get(state.stats.generation) else {
        super::render_message(
            frame,
            inner,
            Line::styled("No generated lyrics available for this artist.", theme.muted()),
        );
        return;
    };

    let tags = tag_line(state, theme);
    let [tags_area, counter, text_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Min(3),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(tags).wrap(Wrap { trim: true }), tags_area);

    let counter_line = Line::from(vec![
        Span::styled(
            format!("Generation {} of {}", state.stats.generation + 1, generations.len()),
            theme.strong(),
        ),
        Span::styled(
            if current.title.is_empty() { String::new() } else { format!("  {}", current.title) },
            theme.muted(),
        ),
        Span::styled("   n/p next/prev", theme.muted()),
    ]);
    frame.render_widget(Paragraph::new(counter_line), counter);

    let ranges = highlight_words(&current.text, &state.stats.highlighted);
    let lines = super::marked_lines(&current.text, &ranges, theme);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), text_area);
}

/// Highlight candidates as toggleable tags.
fn tag_line(state: &AppState, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled("Highlight: ", theme.muted())];
    for (i, word) in state.highlight_candidates().into_iter().enumerate() {
        let on = state.stats.highlighted.contains(&word);
        let mut style = if on {
            theme.cursor()
        } else {
            Style::default().fg(theme.palette.fg_primary)
        };
        if i == state.stats.tag_cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {word} "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::super::testing::{render, text};
    use crate::app::actions::Action;
    use crate::app::events::NetworkEvent;
    use crate::app::state::AppState;
    use crate::dataset::fixtures::record;
    use crate::dataset::{ArtistDataset, DatasetSource, Generation};
    use crate::routing::Route;
    use std::path::PathBuf;

    fn loaded(location: &str) -> AppState {
        let mut ds = ArtistDataset::new();
        let mut rec = record(&[("noche", 1500), ("luna", 20)], 12);
        rec.generations = vec![
            Generation { title: "Primera".into(), text: "la noche es larga".into() },
            Generation { title: "Segunda".into(), text: "luna de papel".into() },
        ];
        ds.insert("Los Piojos".into(), rec);
        ds.insert("Sin Nada".into(), record(&[], 0));

        let mut state = AppState::new(DatasetSource::File(PathBuf::from("d.json")), Route::parse(location), 4);
        state.start();
        state.on_network(NetworkEvent::DatasetLoaded(Ok(ds)));
        state
    }

    #[test]
    fn test_renders_summary_words_and_generation() {
        let state = loaded("/estadisticas/los-piojos/2");
        let screen = text(&render(&state, 140, 40));
        assert!(screen.contains("Stats for Los Piojos"));
        assert!(screen.contains("Total words: 1,520"));
        assert!(screen.contains("noche"));
        assert!(screen.contains("Generation 2 of 2"));
        assert!(screen.contains("luna de papel"));
    }

    #[test]
    fn test_empty_artist_messages() {
        let mut state = loaded("/estadisticas/sin-nada");
        state.apply(Action::MoreWords);
        let screen = text(&render(&state, 140, 40));
        assert!(screen.contains("No words to show."));
        assert!(screen.contains("No generated lyrics available"));
    }
}
