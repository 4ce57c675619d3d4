use crate::app::state::AppState;
use crate::routing::View;
use crate::tui::theme::get_theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const PROJECT_REPO: &str = "https://github.com/bernardo-campos/gpt2-letras-espanol";
const BASE_MODEL: &str = "https://huggingface.co/DeepESP/gpt2-spanish";

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let [header, links, footer] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Min(7),
        Constraint::Length(4),
    ])
    .areas(area);

    let title = vec![
        Line::default(),
        Line::styled(
            "Song Lyrics Analysis",
            theme.strong().add_modifier(Modifier::UNDERLINED),
        ),
        Line::default(),
        Line::styled(
            "Explore the dataset, the statistics and the lyrics generated with a model fine-tuned from",
            Style::default().fg(theme.palette.fg_primary),
        ),
        Line::styled(BASE_MODEL, theme.muted()),
    ];
    frame.render_widget(
        Paragraph::new(title)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        header,
    );

    let mut lines = vec![Line::styled("Start exploring:", theme.muted()), Line::default()];
    for (i, view) in View::ALL.iter().enumerate().skip(1) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", i + 1), theme.strong()),
            Span::styled(format!("{} ", theme.icons.for_view(*view)), theme.muted()),
            Span::styled(view.label(), Style::default().fg(theme.palette.fg_primary)),
        ]));
    }
    if let Some(err) = state.dataset.error() {
        lines.push(Line::default());
        lines.push(Line::styled(format!("{} {err}", theme.icons.error), theme.strong()));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), links);

    let credits = Paragraph::new(vec![
        Line::styled(
            "Part of the thesis project on AI-driven song lyric generation (UCSE).",
            theme.muted(),
        ),
        Line::styled(PROJECT_REPO, theme.muted()),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(credits, footer);
}
