//! Key mapping for the TUI
//!
//! Translates key presses into reducer actions based on the current
//! screen and modal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{Action, Modal, Screen, UiState};

/// Map a key press to an action, if it means anything right now
pub fn key_to_action(state: &UiState, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if state.screen == Screen::Locked {
        return match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => Some(Action::PinDigit(c)),
            KeyCode::Backspace => Some(Action::PinBackspace),
            KeyCode::Enter => Some(Action::PinSubmit),
            KeyCode::Esc => Some(Action::Quit),
            _ => None,
        };
    }

    if state.has_modal() {
        let confirming = matches!(state.modal, Modal::ConfirmClean(_));
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') if confirming => Some(Action::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
                Some(Action::Cancel)
            }
            KeyCode::Enter if !confirming => Some(Action::Cancel),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevMonth),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::NextMonth),
        KeyCode::Char('t') => Some(Action::ThisMonth),
        KeyCode::Tab => Some(Action::ToggleTab),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectDown),
        KeyCode::Char('c') => Some(Action::RequestClean),
        KeyCode::Char('a') => Some(Action::RequestAdvice),
        KeyCode::Char('e') => Some(Action::Export),
        _ => None,
    }
}
