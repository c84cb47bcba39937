//! Event vocabulary and dispatch
//!
//! Every front-end (buttons, keyboard, terminal, key scripts) reduces its
//! input to a [`CalcEvent`] and hands it to [`dispatch`], which applies it
//! and renders the resulting display text.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::operations::Operator;
use super::state::CalculatorState;

/// One discrete input to the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum CalcEvent {
    /// A digit 0-9
    Digit(u8),
    /// The decimal point
    DecimalPoint,
    /// An arithmetic operator
    Operator(Operator),
    /// Evaluate the pending operation
    Equals,
    /// Reset to the initial state
    Clear,
    /// Delete the last character
    Backspace,
}

impl CalcEvent {
    /// Short label as printed on a keypad button
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::Backspace => "<".to_string(),
        }
    }
}

impl fmt::Display for CalcEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "digit({d})"),
            Self::DecimalPoint => write!(f, "decimal_point"),
            Self::Operator(op) => write!(f, "operator({op})"),
            Self::Equals => write!(f, "equals"),
            Self::Clear => write!(f, "clear"),
            Self::Backspace => write!(f, "backspace"),
        }
    }
}

/// Receives the display text after every event
pub trait Renderer {
    /// Shows `display_text`
    fn render(&mut self, display_text: &str);
}

impl<F> Renderer for F
where
    F: FnMut(&str),
{
    fn render(&mut self, display_text: &str) {
        self(display_text);
    }
}

/// Applies `event` to `state` and renders the new display text
pub fn dispatch<R>(state: &mut CalculatorState, event: CalcEvent, renderer: &mut R)
where
    R: Renderer + ?Sized,
{
    let text = state.apply(event);
    renderer.render(text);
}
