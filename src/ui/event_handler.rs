//! Keyboard dispatch for the board.
//!
//! Keys are mapped to [`UiCommand`]s per input mode; the application loop
//! interprets the command against the current overlay. An Esc inside any
//! overlay is a dismissal, which the loop routes through the same cancel
//! path as an explicit cancel.

use crossterm::event::{KeyCode, KeyModifiers};

use super::state::InputMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    None,
    Quit,
    /// Dismiss the open overlay (treated as cancel for prompts).
    CloseOverlay,
    /// Confirm the open overlay.
    Confirm,
    MoveUp,
    MoveDown,
    FocusLeft,
    FocusRight,
    /// Open the value picker on the focused control.
    OpenChooser,
    ShowProducts,
    ReloadBoard,
    InputChar(char),
    Backspace,
}

pub fn map_key(mode: InputMode, code: KeyCode, modifiers: KeyModifiers) -> UiCommand {
    if let KeyCode::Char('c') = code {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return UiCommand::Quit;
        }
    }

    match mode {
        InputMode::Table => match code {
            KeyCode::Char('q') | KeyCode::Esc => UiCommand::Quit,
            KeyCode::Up | KeyCode::Char('k') => UiCommand::MoveUp,
            KeyCode::Down | KeyCode::Char('j') => UiCommand::MoveDown,
            KeyCode::Left | KeyCode::Char('h') => UiCommand::FocusLeft,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => UiCommand::FocusRight,
            KeyCode::Enter => UiCommand::OpenChooser,
            KeyCode::Char('p') => UiCommand::ShowProducts,
            KeyCode::Char('r') => UiCommand::ReloadBoard,
            _ => UiCommand::None,
        },
        InputMode::Chooser | InputMode::ReasonPrompt => match code {
            KeyCode::Up | KeyCode::Char('k') => UiCommand::MoveUp,
            KeyCode::Down | KeyCode::Char('j') => UiCommand::MoveDown,
            KeyCode::Enter => UiCommand::Confirm,
            KeyCode::Esc => UiCommand::CloseOverlay,
            _ => UiCommand::None,
        },
        InputMode::NumberPrompt => match code {
            KeyCode::Enter => UiCommand::Confirm,
            KeyCode::Esc => UiCommand::CloseOverlay,
            KeyCode::Backspace => UiCommand::Backspace,
            KeyCode::Char(c) => UiCommand::InputChar(c),
            _ => UiCommand::None,
        },
        InputMode::Warning => match code {
            KeyCode::Enter => UiCommand::Confirm,
            KeyCode::Esc => UiCommand::CloseOverlay,
            _ => UiCommand::None,
        },
        InputMode::Products => match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => UiCommand::CloseOverlay,
            _ => UiCommand::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_quits_in_every_mode() {
        for mode in [
            InputMode::Table,
            InputMode::Chooser,
            InputMode::NumberPrompt,
            InputMode::ReasonPrompt,
            InputMode::Warning,
            InputMode::Products,
        ] {
            assert_eq!(
                map_key(mode, KeyCode::Char('c'), KeyModifiers::CONTROL),
                UiCommand::Quit
            );
        }
    }

    #[test]
    fn test_esc_dismisses_overlays_but_quits_the_table() {
        assert_eq!(
            map_key(InputMode::Table, KeyCode::Esc, KeyModifiers::NONE),
            UiCommand::Quit
        );
        for mode in [
            InputMode::Chooser,
            InputMode::NumberPrompt,
            InputMode::ReasonPrompt,
            InputMode::Warning,
        ] {
            assert_eq!(
                map_key(mode, KeyCode::Esc, KeyModifiers::NONE),
                UiCommand::CloseOverlay
            );
        }
    }

    #[test]
    fn test_number_prompt_receives_typed_characters() {
        assert_eq!(
            map_key(InputMode::NumberPrompt, KeyCode::Char('P'), KeyModifiers::SHIFT),
            UiCommand::InputChar('P')
        );
        assert_eq!(
            map_key(InputMode::NumberPrompt, KeyCode::Backspace, KeyModifiers::NONE),
            UiCommand::Backspace
        );
    }
}
