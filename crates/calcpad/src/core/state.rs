//! Calculator state machine
//!
//! [`CalculatorState`] holds what the display shows plus the left operand and
//! operator waiting for the next entry. It is created once per front-end,
//! mutated in place by every event and reset with [`CalculatorState::clear`].

use serde::Serialize;
use tracing::{debug, warn};

use super::event::CalcEvent;
use super::format::{parse_number, NumberFormat};
use super::operations::Operator;

/// Display text of a fresh or cleared calculator
pub const INITIAL_TEXT: &str = "0";

/// Display sentinel after a failed evaluation
pub const ERROR_TEXT: &str = "Error";

/// Digit/operator calculator state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorState {
    /// Text currently shown
    #[serde(rename = "display")]
    display_text: String,
    /// Left operand waiting for the next entry
    stored_operand: Option<f64>,
    /// Operator selected but not yet applied
    pending_operator: Option<Operator>,
    /// The next digit starts a new operand
    awaiting_fresh_input: bool,
    #[serde(skip)]
    format: NumberFormat,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Creates a calculator showing `0`
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(NumberFormat::default())
    }

    /// Creates a calculator with custom result formatting
    #[must_use]
    pub fn with_format(format: NumberFormat) -> Self {
        Self {
            display_text: INITIAL_TEXT.to_string(),
            stored_operand: None,
            pending_operator: None,
            awaiting_fresh_input: false,
            format,
        }
    }

    /// Returns the text currently shown
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display_text
    }

    /// Returns the stored left operand, if any
    #[must_use]
    pub fn stored_operand(&self) -> Option<f64> {
        self.stored_operand
    }

    /// Returns the pending operator, if any
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// Returns true when the next digit replaces the display
    #[must_use]
    pub fn is_awaiting_fresh_input(&self) -> bool {
        self.awaiting_fresh_input
    }

    /// Returns true while the display shows the error sentinel
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.display_text == ERROR_TEXT
    }

    /// Returns the numeric value of the display
    #[must_use]
    pub fn accumulator(&self) -> f64 {
        parse_number(&self.display_text)
    }

    /// Returns the result formatting
    #[must_use]
    pub fn format(&self) -> &NumberFormat {
        &self.format
    }

    /// Applies one event and returns the new display text
    pub fn apply(&mut self, event: CalcEvent) -> &str {
        match event {
            CalcEvent::Digit(d) => self.digit(d),
            CalcEvent::DecimalPoint => self.decimal_point(),
            CalcEvent::Operator(op) => self.operator(op),
            CalcEvent::Equals => self.equals(),
            CalcEvent::Clear => self.clear(),
            CalcEvent::Backspace => self.backspace(),
        };
        debug!(
            event = %event,
            display = %self.display_text,
            pending = ?self.pending_operator,
            "calculator event"
        );
        &self.display_text
    }

    /// Enters a digit. Values above 9 are ignored.
    pub fn digit(&mut self, d: u8) -> &str {
        if d > 9 {
            return &self.display_text;
        }
        let ch = char::from(b'0' + d);
        if self.awaiting_fresh_input {
            self.replace_display(ch);
            self.awaiting_fresh_input = false;
        } else if self.display_text == INITIAL_TEXT || self.is_error() {
            self.replace_display(ch);
        } else {
            self.display_text.push(ch);
        }
        &self.display_text
    }

    /// Enters the decimal point; a second point in one operand is ignored
    pub fn decimal_point(&mut self) -> &str {
        if self.awaiting_fresh_input {
            self.display_text = "0.".to_string();
            self.awaiting_fresh_input = false;
        } else if self.is_error() {
            self.display_text = "0.".to_string();
        } else if !self.display_text.contains('.') {
            self.display_text.push('.');
        }
        &self.display_text
    }

    /// Selects an operator, evaluating any pending operation first
    pub fn operator(&mut self, op: Operator) -> &str {
        if self.is_error() {
            return &self.display_text;
        }
        if self.pending_operator.is_some() && !self.awaiting_fresh_input {
            self.equals();
            if self.is_error() {
                return &self.display_text;
            }
        }
        self.stored_operand = Some(self.accumulator());
        self.pending_operator = Some(op);
        self.awaiting_fresh_input = true;
        &self.display_text
    }

    /// Applies the pending operator to the stored operand and the display
    pub fn equals(&mut self) -> &str {
        let (Some(op), Some(lhs)) = (self.pending_operator, self.stored_operand) else {
            return &self.display_text;
        };
        let rhs = self.accumulator();
        match op.apply(lhs, rhs) {
            Ok(result) => {
                self.display_text = self.format.render(result);
            }
            Err(err) => {
                warn!(%err, lhs, rhs, operator = %op, "evaluation failed");
                self.display_text = ERROR_TEXT.to_string();
            }
        }
        self.stored_operand = None;
        self.pending_operator = None;
        self.awaiting_fresh_input = true;
        &self.display_text
    }

    /// Resets to the initial state, keeping the formatting
    pub fn clear(&mut self) -> &str {
        self.display_text.clear();
        self.display_text.push_str(INITIAL_TEXT);
        self.stored_operand = None;
        self.pending_operator = None;
        self.awaiting_fresh_input = false;
        &self.display_text
    }

    /// Deletes the last entered character
    pub fn backspace(&mut self) -> &str {
        if self.awaiting_fresh_input || self.is_error() {
            self.display_text = INITIAL_TEXT.to_string();
            self.awaiting_fresh_input = false;
        } else if self.display_text.chars().count() <= 1 {
            self.display_text = INITIAL_TEXT.to_string();
        } else {
            self.display_text.pop();
        }
        &self.display_text
    }

    fn replace_display(&mut self, ch: char) {
        self.display_text.clear();
        self.display_text.push(ch);
    }
}
