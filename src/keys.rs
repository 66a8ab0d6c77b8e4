//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextFocus,
    PrevFocus,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Select,
    Confirm,
    Cancel,
    NextPage,
    PrevPage,
    InsertChar(char),
    DeleteChar,
    ClearFilters,
    Refresh,
    ToggleTheme,
    OpenHelp,
}

/// Map a key event to an action. `editing` is true while a text input has
/// focus and no overlay is open; printable keys then feed the input
/// instead of triggering shortcuts.
pub fn map_key(event: KeyEvent, editing: bool) -> Option<Action> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('l') => Some(Action::ClearFilters),
            _ => None,
        };
    }

    match code {
        KeyCode::Tab => return Some(Action::NextFocus),
        KeyCode::BackTab => return Some(Action::PrevFocus),
        KeyCode::Esc => return Some(Action::Cancel),
        KeyCode::Enter => return Some(Action::Confirm),
        KeyCode::PageDown => return Some(Action::NextPage),
        KeyCode::PageUp => return Some(Action::PrevPage),
        KeyCode::Up => return Some(Action::MoveUp),
        KeyCode::Down => return Some(Action::MoveDown),
        KeyCode::Left => return Some(Action::MoveLeft),
        KeyCode::Right => return Some(Action::MoveRight),
        _ => {}
    }

    if editing {
        return match code {
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::InsertChar(c)),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char(' ') => Some(Action::Select),
        KeyCode::Char('[') => Some(Action::PrevPage),
        KeyCode::Char(']') => Some(Action::NextPage),
        KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Char('l') => Some(Action::MoveRight),
        _ => None,
    }
}
