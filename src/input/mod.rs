use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, GeneratorField, InputMode};
use crate::routing::View;
use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>, mouse_enabled: bool) {
    tokio::task::spawn_blocking(move || {
        loop {
            if !event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                continue;
            }
            let ev = match event::read() {
                Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                Ok(CtEvent::Mouse(m)) if mouse_enabled => InputEvent::Mouse(m),
                Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!("terminal read failed: {e}");
                    continue;
                }
            };
            if tx.blocking_send(Event::Input(ev)).is_err() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => match (state.input_mode, m.kind) {
            (InputMode::Picker, MouseEventKind::ScrollUp) => Some(Action::PickerUp),
            (InputMode::Picker, MouseEventKind::ScrollDown) => Some(Action::PickerDown),
            (_, MouseEventKind::ScrollUp) if state.nav.view() == View::Dataset => Some(Action::ScrollLyricUp),
            (_, MouseEventKind::ScrollDown) if state.nav.view() == View::Dataset => Some(Action::ScrollLyricDown),
            (_, MouseEventKind::ScrollUp) => Some(Action::ListUp),
            (_, MouseEventKind::ScrollDown) => Some(Action::ListDown),
            _ => None,
        },
        InputEvent::Key(k) => {
            if state.show_help {
                return Some(Action::ToggleHelp);
            }
            match state.input_mode {
                InputMode::Normal => handle_normal_mode(state, k),
                InputMode::Picker => handle_picker(k),
                InputMode::Location | InputMode::Search | InputMode::Prompt => handle_text_input(k),
            }
        }
    }
}

fn ctrl(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_text_input(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc => Some(Action::CancelInput),
        KeyCode::Enter => Some(Action::SubmitInput),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char('u') if ctrl(&k) => Some(Action::ClearInput),
        KeyCode::Char('g') if ctrl(&k) => Some(Action::Generate),
        KeyCode::Char(c) if !ctrl(&k) => Some(Action::InputChar(c)),
        _ => None,
    }
}

fn handle_picker(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::CancelInput),
        KeyCode::Enter => Some(Action::PickerConfirm),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::PickerUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::PickerDown),
        _ => None,
    }
}

fn handle_normal_mode(state: &AppState, k: KeyEvent) -> Option<Action> {
    // Keys shared by every view.
    let global = match k.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if ctrl(&k) => Some(Action::Quit),
        KeyCode::Char('r') if ctrl(&k) => Some(Action::Reload),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Left if k.modifiers.contains(KeyModifiers::ALT) => Some(Action::Back),
        KeyCode::Right if k.modifiers.contains(KeyModifiers::ALT) => Some(Action::Forward),
        KeyCode::Char(',') => Some(Action::Back),
        KeyCode::Char('.') => Some(Action::Forward),
        KeyCode::Char(':') => Some(Action::StartLocationInput),
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            View::ALL.get(idx).copied().map(Action::OpenView)
        }
        _ => None,
    };
    if global.is_some() {
        return global;
    }

    match state.nav.view() {
        View::Home => None,
        View::ArtistStats => handle_stats(k),
        View::GlobalStats => handle_list(k),
        View::Dataset => handle_explorer(k),
        View::Generator => handle_generator(state, k),
    }
}

fn handle_artist_selector(k: &KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('[') => Some(Action::PrevArtist),
        KeyCode::Char(']') => Some(Action::NextArtist),
        KeyCode::Char('a') => Some(Action::OpenArtistPicker),
        _ => None,
    }
}

fn handle_list(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') => Some(Action::GoTop),
        KeyCode::Char('G') => Some(Action::GoBottom),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Char('d') if ctrl(&k) => Some(Action::PageDown),
        KeyCode::Char('u') if ctrl(&k) => Some(Action::PageUp),
        _ => None,
    }
}

fn handle_stats(k: KeyEvent) -> Option<Action> {
    if let Some(action) = handle_artist_selector(&k) {
        return Some(action);
    }
    match k.code {
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::MoreWords),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Action::FewerWords),
        KeyCode::Char('n') => Some(Action::NextGeneration),
        KeyCode::Char('p') => Some(Action::PrevGeneration),
        KeyCode::Char('w') | KeyCode::Char('l') => Some(Action::TagRight),
        KeyCode::Char('W') | KeyCode::Char('h') => Some(Action::TagLeft),
        KeyCode::Char(' ') => Some(Action::ToggleTag),
        _ => handle_list(k),
    }
}

fn handle_explorer(k: KeyEvent) -> Option<Action> {
    if let Some(action) = handle_artist_selector(&k) {
        return Some(action);
    }
    match k.code {
        KeyCode::Char('/') => Some(Action::StartSearch),
        KeyCode::Enter => Some(Action::OpenSong),
        KeyCode::Char('n') => Some(Action::NextSong),
        KeyCode::Char('p') => Some(Action::PrevSong),
        KeyCode::Char('J') => Some(Action::ScrollLyricDown),
        KeyCode::Char('K') => Some(Action::ScrollLyricUp),
        _ => handle_list(k),
    }
}

fn handle_generator(state: &AppState, k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('g') if ctrl(&k) => Some(Action::Generate),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::FocusPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::FocusNext),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::OptionPrev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::OptionNext),
        KeyCode::Char('i') => Some(Action::EditPrompt),
        KeyCode::Char('a') => Some(Action::OpenArtistPicker),
        KeyCode::Enter => match state.generator.focus {
            GeneratorField::Prompt => Some(Action::EditPrompt),
            GeneratorField::Artist => Some(Action::OpenArtistPicker),
            GeneratorField::Model => Some(Action::OptionNext),
            GeneratorField::Submit => Some(Action::Generate),
        },
        _ => None,
    }
}
