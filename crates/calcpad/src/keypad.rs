//! Keypad layout and key mapping
//!
//! The keypad is shared by every front-end: the DOM builds one `<button>` per
//! entry, the terminal draws and hit-tests the same grid.
//!
//! ```text
//! [ 7 ] [ 8 ] [ 9 ] [ / ]
//! [ 4 ] [ 5 ] [ 6 ] [ * ]
//! [ 1 ] [ 2 ] [ 3 ] [ - ]
//! [ 0 ] [ . ] [ = ] [ + ]
//! [ C ] [ < ]
//! ```
//!
//! Keyboard input uses browser `KeyboardEvent.key` names (`"7"`, `"Enter"`,
//! `"Backspace"`); button clicks carry a `data-action`/`data-value` pair.

use tracing::debug;

use crate::core::{CalcEvent, Operator};

/// `data-action` of digit buttons
pub const ACTION_NUMBER: &str = "number";
/// `data-action` of operator buttons
pub const ACTION_OPERATOR: &str = "operator";
/// `data-action` of the decimal point button
pub const ACTION_DECIMAL: &str = "decimal";
/// `data-action` of the equals button
pub const ACTION_EQUALS: &str = "equals";
/// `data-action` of the clear button
pub const ACTION_CLEAR: &str = "clear";
/// `data-action` of the backspace button
pub const ACTION_BACKSPACE: &str = "backspace";

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The event this button emits
    pub event: CalcEvent,
    /// DOM element id (`btn-7`, `btn-plus`, ...)
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a button, deriving its element id from the event
    #[must_use]
    pub fn new(event: CalcEvent, row: usize, col: usize) -> Self {
        let id = match event {
            CalcEvent::Digit(d) => format!("btn-{d}"),
            CalcEvent::DecimalPoint => "btn-decimal".to_string(),
            CalcEvent::Operator(op) => format!("btn-{}", op.name()),
            CalcEvent::Equals => "btn-equals".to_string(),
            CalcEvent::Clear => "btn-clear".to_string(),
            CalcEvent::Backspace => "btn-backspace".to_string(),
        };
        Self { event, id, row, col }
    }

    /// Text printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.event.label()
    }

    /// The `data-action` / `data-value` pair this button carries
    #[must_use]
    pub fn dataset(&self) -> (&'static str, Option<String>) {
        match self.event {
            CalcEvent::Digit(d) => (ACTION_NUMBER, Some(d.to_string())),
            CalcEvent::Operator(op) => (ACTION_OPERATOR, Some(op.symbol().to_string())),
            CalcEvent::DecimalPoint => (ACTION_DECIMAL, None),
            CalcEvent::Equals => (ACTION_EQUALS, None),
            CalcEvent::Clear => (ACTION_CLEAR, None),
            CalcEvent::Backspace => (ACTION_BACKSPACE, None),
        }
    }
}

/// Calculator keypad layout
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            // Row 0: 7 8 9 /
            KeypadButton::new(CalcEvent::Digit(7), 0, 0),
            KeypadButton::new(CalcEvent::Digit(8), 0, 1),
            KeypadButton::new(CalcEvent::Digit(9), 0, 2),
            KeypadButton::new(CalcEvent::Operator(Operator::Divide), 0, 3),
            // Row 1: 4 5 6 *
            KeypadButton::new(CalcEvent::Digit(4), 1, 0),
            KeypadButton::new(CalcEvent::Digit(5), 1, 1),
            KeypadButton::new(CalcEvent::Digit(6), 1, 2),
            KeypadButton::new(CalcEvent::Operator(Operator::Multiply), 1, 3),
            // Row 2: 1 2 3 -
            KeypadButton::new(CalcEvent::Digit(1), 2, 0),
            KeypadButton::new(CalcEvent::Digit(2), 2, 1),
            KeypadButton::new(CalcEvent::Digit(3), 2, 2),
            KeypadButton::new(CalcEvent::Operator(Operator::Subtract), 2, 3),
            // Row 3: 0 . = +
            KeypadButton::new(CalcEvent::Digit(0), 3, 0),
            KeypadButton::new(CalcEvent::DecimalPoint, 3, 1),
            KeypadButton::new(CalcEvent::Equals, 3, 2),
            KeypadButton::new(CalcEvent::Operator(Operator::Add), 3, 3),
            // Row 4: C <
            KeypadButton::new(CalcEvent::Clear, 4, 0),
            KeypadButton::new(CalcEvent::Backspace, 4, 1),
        ];

        Self {
            buttons,
            rows: 5,
            cols: 4,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all buttons
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets the button at a grid position; the last row is partly empty
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Index of the button at a grid position
    #[must_use]
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        self.buttons
            .iter()
            .position(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element id
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button that emits `event`
    #[must_use]
    pub fn find_button_by_event(&self, event: CalcEvent) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.event == event)
    }

    /// Index of the button that emits `event`
    #[must_use]
    pub fn index_of_event(&self, event: CalcEvent) -> Option<usize> {
        self.buttons.iter().position(|b| b.event == event)
    }
}

/// Maps a browser key name to a calculator event.
///
/// Returns `None` for keys the calculator does not handle; front-ends leave
/// the browser default alone for those.
#[must_use]
pub fn key_to_event(key: &str) -> Option<CalcEvent> {
    let event = match key {
        "Enter" | "=" => Some(CalcEvent::Equals),
        "Escape" | "c" | "C" => Some(CalcEvent::Clear),
        "Backspace" => Some(CalcEvent::Backspace),
        "." | "," => Some(CalcEvent::DecimalPoint),
        _ => single_char(key).and_then(|ch| match ch {
            '0'..='9' => Some(CalcEvent::Digit(ch as u8 - b'0')),
            other => Operator::from_symbol(other).map(CalcEvent::Operator),
        }),
    };
    if event.is_none() {
        debug!(key, "unmapped key ignored");
    }
    event
}

/// Maps a clicked button's `data-action`/`data-value` to an event.
///
/// Unknown actions and malformed values yield `None`.
#[must_use]
pub fn event_from_dataset(action: &str, value: Option<&str>) -> Option<CalcEvent> {
    match action {
        ACTION_NUMBER => {
            let ch = single_char(value?.trim())?;
            ch.to_digit(10).map(|d| CalcEvent::Digit(d as u8))
        }
        ACTION_OPERATOR => Operator::from_button_value(value?).map(CalcEvent::Operator),
        ACTION_DECIMAL => Some(CalcEvent::DecimalPoint),
        ACTION_EQUALS => Some(CalcEvent::Equals),
        ACTION_CLEAR => Some(CalcEvent::Clear),
        ACTION_BACKSPACE => Some(CalcEvent::Backspace),
        _ => {
            debug!(action, "unknown data-action ignored");
            None
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== KeypadButton tests =====

    #[test]
    fn test_button_ids() {
        let cases = [
            (CalcEvent::Digit(7), "btn-7"),
            (CalcEvent::DecimalPoint, "btn-decimal"),
            (CalcEvent::Operator(Operator::Add), "btn-plus"),
            (CalcEvent::Operator(Operator::Subtract), "btn-minus"),
            (CalcEvent::Operator(Operator::Multiply), "btn-times"),
            (CalcEvent::Operator(Operator::Divide), "btn-divide"),
            (CalcEvent::Equals, "btn-equals"),
            (CalcEvent::Clear, "btn-clear"),
            (CalcEvent::Backspace, "btn-backspace"),
        ];
        for (event, id) in cases {
            assert_eq!(KeypadButton::new(event, 0, 0).id, id);
        }
    }

    #[test]
    fn test_button_dataset() {
        let digit = KeypadButton::new(CalcEvent::Digit(4), 0, 0);
        assert_eq!(digit.dataset(), ("number", Some("4".to_string())));

        let op = KeypadButton::new(CalcEvent::Operator(Operator::Multiply), 0, 0);
        assert_eq!(op.dataset(), ("operator", Some("*".to_string())));

        let eq = KeypadButton::new(CalcEvent::Equals, 0, 0);
        assert_eq!(eq.dataset(), ("equals", None));
    }

    #[test]
    fn test_dataset_roundtrip_for_every_button() {
        let keypad = Keypad::new();
        for button in keypad.buttons() {
            let (action, value) = button.dataset();
            assert_eq!(
                event_from_dataset(action, value.as_deref()),
                Some(button.event),
                "button {}",
                button.id
            );
        }
    }

    // ===== Keypad layout tests =====

    #[test]
    fn test_keypad_button_count() {
        let keypad = Keypad::new();
        assert_eq!(keypad.button_count(), 18);
        assert_eq!(keypad.dimensions(), (5, 4));
    }

    #[test]
    fn test_keypad_default() {
        assert_eq!(Keypad::default().button_count(), 18);
    }

    #[test]
    fn test_keypad_layout_rows() {
        let keypad = Keypad::new();
        let row0: Vec<String> = (0..4)
            .filter_map(|c| keypad.get_button_at(0, c))
            .map(KeypadButton::label)
            .collect();
        assert_eq!(row0, vec!["7", "8", "9", "/"]);

        let row3: Vec<String> = (0..4)
            .filter_map(|c| keypad.get_button_at(3, c))
            .map(KeypadButton::label)
            .collect();
        assert_eq!(row3, vec!["0", ".", "=", "+"]);
    }

    #[test]
    fn test_keypad_last_row_partial() {
        let keypad = Keypad::new();
        assert_eq!(keypad.get_button_at(4, 0).unwrap().event, CalcEvent::Clear);
        assert_eq!(
            keypad.get_button_at(4, 1).unwrap().event,
            CalcEvent::Backspace
        );
        assert!(keypad.get_button_at(4, 2).is_none());
        assert!(keypad.get_button_at(4, 3).is_none());
        assert!(keypad.get_button_at(5, 0).is_none());
    }

    #[test]
    fn test_keypad_index_lookups() {
        let keypad = Keypad::new();
        assert_eq!(keypad.index_at(0, 0), Some(0));
        assert_eq!(keypad.index_at(4, 1), Some(17));
        assert_eq!(keypad.index_of_event(CalcEvent::Equals), Some(14));
        assert_eq!(keypad.get_button(14).unwrap().id, "btn-equals");
        assert!(keypad.get_button(18).is_none());
    }

    #[test]
    fn test_keypad_find_by_id() {
        let keypad = Keypad::new();
        let btn = keypad.find_button_by_id("btn-plus").unwrap();
        assert_eq!(btn.event, CalcEvent::Operator(Operator::Add));
        assert!(keypad.find_button_by_id("btn-power").is_none());
    }

    #[test]
    fn test_keypad_find_by_event() {
        let keypad = Keypad::new();
        let btn = keypad.find_button_by_event(CalcEvent::Digit(5)).unwrap();
        assert_eq!((btn.row, btn.col), (1, 1));
    }

    #[test]
    fn test_keypad_ids_unique() {
        let keypad = Keypad::new();
        let mut ids: Vec<&str> = keypad.buttons().iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), keypad.button_count());
    }

    // ===== key_to_event tests =====

    #[test]
    fn test_key_digits() {
        for d in 0..=9u8 {
            assert_eq!(key_to_event(&d.to_string()), Some(CalcEvent::Digit(d)));
        }
    }

    #[test]
    fn test_key_operators() {
        assert_eq!(
            key_to_event("+"),
            Some(CalcEvent::Operator(Operator::Add))
        );
        assert_eq!(
            key_to_event("-"),
            Some(CalcEvent::Operator(Operator::Subtract))
        );
        assert_eq!(
            key_to_event("*"),
            Some(CalcEvent::Operator(Operator::Multiply))
        );
        assert_eq!(
            key_to_event("/"),
            Some(CalcEvent::Operator(Operator::Divide))
        );
    }

    #[test]
    fn test_key_named() {
        assert_eq!(key_to_event("Enter"), Some(CalcEvent::Equals));
        assert_eq!(key_to_event("="), Some(CalcEvent::Equals));
        assert_eq!(key_to_event("Escape"), Some(CalcEvent::Clear));
        assert_eq!(key_to_event("c"), Some(CalcEvent::Clear));
        assert_eq!(key_to_event("C"), Some(CalcEvent::Clear));
        assert_eq!(key_to_event("Backspace"), Some(CalcEvent::Backspace));
        assert_eq!(key_to_event("."), Some(CalcEvent::DecimalPoint));
        assert_eq!(key_to_event(","), Some(CalcEvent::DecimalPoint));
    }

    #[test]
    fn test_key_unmapped() {
        assert_eq!(key_to_event("a"), None);
        assert_eq!(key_to_event("Tab"), None);
        assert_eq!(key_to_event("^"), None);
        assert_eq!(key_to_event("×"), None);
        assert_eq!(key_to_event(""), None);
        assert_eq!(key_to_event("12"), None);
    }

    // ===== event_from_dataset tests =====

    #[test]
    fn test_dataset_number() {
        assert_eq!(
            event_from_dataset("number", Some("9")),
            Some(CalcEvent::Digit(9))
        );
        assert_eq!(event_from_dataset("number", Some("x")), None);
        assert_eq!(event_from_dataset("number", Some("12")), None);
        assert_eq!(event_from_dataset("number", None), None);
    }

    #[test]
    fn test_dataset_operator_typographic() {
        assert_eq!(
            event_from_dataset("operator", Some("×")),
            Some(CalcEvent::Operator(Operator::Multiply))
        );
        assert_eq!(
            event_from_dataset("operator", Some("÷")),
            Some(CalcEvent::Operator(Operator::Divide))
        );
        assert_eq!(
            event_from_dataset("operator", Some("−")),
            Some(CalcEvent::Operator(Operator::Subtract))
        );
        assert_eq!(event_from_dataset("operator", Some("^")), None);
    }

    #[test]
    fn test_dataset_valueless_actions() {
        assert_eq!(
            event_from_dataset("decimal", None),
            Some(CalcEvent::DecimalPoint)
        );
        assert_eq!(event_from_dataset("equals", None), Some(CalcEvent::Equals));
        assert_eq!(event_from_dataset("clear", None), Some(CalcEvent::Clear));
        assert_eq!(
            event_from_dataset("backspace", Some("ignored")),
            Some(CalcEvent::Backspace)
        );
    }

    #[test]
    fn test_dataset_unknown_action() {
        assert_eq!(event_from_dataset("percent", Some("%")), None);
        assert_eq!(event_from_dataset("", None), None);
    }
}
