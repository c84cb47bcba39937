//! Keyboard input handling
//!
//! Terminal keys go through the same browser key mapping as the page does,
//! with a few terminal-only bindings for quitting.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::CalcEvent;
use crate::keypad::key_to_event;

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed an event to the calculator
    Calc(CalcEvent),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action. Key releases are ignored.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        if code == KeyCode::Char('q') {
            return KeyAction::Quit;
        }

        key_name(code)
            .and_then(|name| key_to_event(&name))
            .map_or(KeyAction::None, KeyAction::Calc)
    }
}

/// Browser `KeyboardEvent.key` name of a terminal key code
#[must_use]
pub fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Enter => Some("Enter".to_string()),
        KeyCode::Esc => Some("Escape".to_string()),
        KeyCode::Backspace => Some("Backspace".to_string()),
        _ => None,
    }
}

/// Terminal key code for a browser key name
#[must_use]
pub fn key_code_from_name(name: &str) -> Option<KeyCode> {
    match name {
        "Enter" => Some(KeyCode::Enter),
        "Escape" => Some(KeyCode::Esc),
        "Backspace" => Some(KeyCode::Backspace),
        _ => {
            let mut chars = name.chars();
            let ch = chars.next()?;
            chars.next().is_none().then_some(KeyCode::Char(ch))
        }
    }
}
