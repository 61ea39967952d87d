//! Keybinding definitions for the TUI.
//!
//! The same key means different things depending on what has focus: list
//! panes take single-letter commands, text fields take characters, and an
//! open modal only answers yes/no.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    Navigation,
    TextEntry,
    Modal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPane,
    PrevPane,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Submit,
    Cancel,
    Input(char),
    Backspace,
    ViewAddresses,
    EditItem,
    DeleteItem,
    NewItem,
    Refresh,
    DeleteAddress,
    Confirm,
    Deny,
}

pub fn map_key(event: KeyEvent, mode: KeyMode) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match mode {
        KeyMode::Modal => match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::Deny),
            KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
        KeyMode::TextEntry => match code {
            KeyCode::Tab => Some(Action::NextPane),
            KeyCode::BackTab => Some(Action::PrevPane),
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Left => Some(Action::MoveLeft),
            KeyCode::Right => Some(Action::MoveRight),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        KeyMode::Navigation => match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Tab => Some(Action::NextPane),
            KeyCode::BackTab => Some(Action::PrevPane),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Char('v') => Some(Action::ViewAddresses),
            KeyCode::Char('e') => Some(Action::EditItem),
            KeyCode::Char('d') => Some(Action::DeleteItem),
            KeyCode::Char('n') => Some(Action::NewItem),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('x') => Some(Action::DeleteAddress),
            _ => None,
        },
    }
}
