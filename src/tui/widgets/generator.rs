//! Lyric generator form with its availability overlay.

use crate::app::state::{AppState, Availability, GeneratorField, InputMode};
use crate::tui::theme::{get_theme, LoadingSpinner, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let [form, result] = Layout::vertical([Constraint::Length(9), Constraint::Min(3)]).areas(area);
    render_form(frame, state, &theme, form);
    render_result(frame, state, &theme, result);

    match state.generator.availability {
        Availability::Available => {}
        Availability::Checking => render_checking(frame, state, &theme, area),
        Availability::Unavailable => render_unavailable(frame, state, &theme, area),
    }
}

fn field_line(theme: &Theme, focused: bool, label: &str, value: Vec<Span<'static>>) -> Line<'static> {
    let marker = if focused { theme.icons.selected } else { theme.icons.unselected };
    let label_style = if focused { theme.strong() } else { theme.muted() };
    let mut spans = vec![
        Span::styled(format!("{marker} "), label_style),
        Span::styled(format!("{label:<8}"), label_style),
    ];
    spans.extend(value);
    Line::from(spans)
}

fn choice(theme: &Theme, text: String, placeholder: bool) -> Vec<Span<'static>> {
    let style = if placeholder { theme.muted() } else { Style::default().fg(theme.palette.fg_primary) };
    vec![
        Span::styled("◂ ", theme.muted()),
        Span::styled(text, style),
        Span::styled(" ▸", theme.muted()),
    ]
}

fn render_form(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let g = &state.generator;
    let focus = g.focus;

    let model = match g.model_choice() {
        Some(m) => choice(theme, m.to_string(), false),
        None => choice(theme, "No models configured".into(), true),
    };
    let artist = match g.artist.and_then(|i| state.artists().get(i)) {
        Some(name) => choice(theme, name.clone(), false),
        None => choice(theme, "Select an artist".into(), true),
    };

    let editing = state.input_mode == InputMode::Prompt;
    let mut prompt = vec![];
    if g.prompt.is_empty() && !editing {
        prompt.push(Span::styled("(optional) i to edit", theme.muted()));
    } else {
        prompt.push(Span::styled(g.prompt.clone(), Style::default().fg(theme.palette.fg_primary)));
    }
    if editing {
        prompt.push(Span::styled("█", Style::default().fg(theme.palette.accent)));
    }

    let button = if g.in_flight.is_some() {
        Span::styled(
            format!("[ {} Generating... ]", LoadingSpinner::frame(state.tick)),
            theme.muted(),
        )
    } else if g.can_generate() {
        Span::styled("[ Generate lyrics ]", theme.cursor())
    } else {
        Span::styled(
            "[ Generate lyrics ]",
            theme.muted().add_modifier(Modifier::CROSSED_OUT),
        )
    };

    let lines = vec![
        field_line(theme, focus == GeneratorField::Model, "Model", model),
        Line::default(),
        field_line(theme, focus == GeneratorField::Artist, "Artist", artist),
        Line::default(),
        field_line(theme, focus == GeneratorField::Prompt, "Prompt", prompt),
        Line::default(),
        field_line(theme, focus == GeneratorField::Submit, "", vec![button]),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(theme.panel(" New lyrics ")),
        area,
    );
}

fn render_result(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let g = &state.generator;
    let block = theme.panel(" Result ");

    let lines: Vec<Line> = if let Some(err) = &g.error {
        vec![Line::from(vec![
            Span::styled(format!("{} ", theme.icons.error), theme.strong()),
            Span::styled(err.clone(), theme.strong()),
        ])]
    } else if let Some(text) = &g.result {
        text.lines().map(|l| Line::raw(l.to_string())).collect()
    } else {
        vec![Line::styled("Generated lyrics will appear here.", theme.muted())]
    };

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_checking(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let popup = super::centered_rect(area, 44, 5);
    frame.render_widget(Clear, popup);
    let spinner = LoadingSpinner::frame(state.tick);
    let body = Paragraph::new(vec![
        Line::default(),
        Line::styled(format!("{spinner} Checking availability..."), theme.strong()),
    ])
    .alignment(Alignment::Center)
    .block(theme.panel(""));
    frame.render_widget(body, popup);
}

fn render_unavailable(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let popup = super::centered_rect(area, 72, 9);
    frame.render_widget(Clear, popup);
    let body = Paragraph::new(vec![
        Line::default(),
        Line::styled(format!("{} Service unavailable", theme.icons.error), theme.strong()),
        Line::default(),
        Line::styled(
            "The Hugging Face Space is switched off or not responding right now.",
            Style::default().fg(theme.palette.fg_primary),
        ),
        Line::from(vec![
            Span::styled(format!("{} ", theme.icons.link), theme.muted()),
            Span::styled(
                state.generator.status_page.clone(),
                theme.muted().add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(theme.panel(""));
    frame.render_widget(body, popup);
}

#[cfg(test)]
mod tests {
    use super::super::testing::{render, text};
    use crate::app::events::NetworkEvent;
    use crate::app::state::AppState;
    use crate::dataset::fixtures::dataset;
    use crate::dataset::DatasetSource;
    use crate::routing::Route;
    use std::path::PathBuf;

    fn generator_state() -> AppState {
        let mut state = AppState::new(
            DatasetSource::File(PathBuf::from("d.json")),
            Route::parse("/generar-letra"),
            4,
        );
        state.generator.models = vec!["GPT2 Original (DeepESP/gpt2-spanish)".into()];
        state.generator.status_page = "https://huggingface.co/spaces/owner/name".into();
        state.start();
        state.on_network(NetworkEvent::DatasetLoaded(Ok(dataset(&["Alfa"]))));
        state
    }

    #[test]
    fn test_checking_overlay() {
        let state = generator_state();
        let screen = text(&render(&state, 120, 36));
        assert!(screen.contains("Checking availability"));
    }

    #[test]
    fn test_unavailable_overlay_disables_generate() {
        let mut state = generator_state();
        let ticket = state.generator.probe;
        state.on_network(NetworkEvent::Availability { ticket, up: false });
        state.generator.artist = Some(0);
        assert!(!state.generator.can_generate());

        let screen = text(&render(&state, 120, 36));
        assert!(screen.contains("Service unavailable"));
        assert!(screen.contains("https://huggingface.co/spaces/owner/name"));
    }

    #[test]
    fn test_available_form_and_result() {
        let mut state = generator_state();
        let ticket = state.generator.probe;
        state.on_network(NetworkEvent::Availability { ticket, up: true });
        state.generator.result = Some("primera linea\nsegunda linea".into());

        let screen = text(&render(&state, 120, 36));
        assert!(!screen.contains("Service unavailable"));
        assert!(screen.contains("Select an artist"));
        assert!(screen.contains("GPT2 Original (DeepESP/gpt2-spanish)"));
        assert!(screen.contains("segunda linea"));
    }
}
