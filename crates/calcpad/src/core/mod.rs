//! Calculator engine
//!
//! The engine is a single state machine, [`CalculatorState`], driven by the
//! six events of [`CalcEvent`]. Every operation mutates the state in place and
//! hands back the text the display should show next.
//!
//! - `operations`: the four arithmetic operators and their evaluation
//! - `format`: rounding and rendering of results, parsing of display text
//! - `state`: the state machine itself
//! - `event`: the event vocabulary, dispatch and the [`Renderer`] seam

mod event;
mod format;
mod operations;
mod state;

pub use event::{dispatch, CalcEvent, Renderer};
pub use format::{parse_number, NumberFormat};
pub use operations::Operator;
pub use state::{CalculatorState, ERROR_TEXT, INITIAL_TEXT};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Evaluation failures.
///
/// These never reach front-ends: the engine turns them into the `"Error"`
/// display sentinel inside `equals()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Right operand of a division was exactly zero
    #[error("Division by zero")]
    DivisionByZero,
    /// Result is not a finite number
    #[error("Overflow: result is not a finite number")]
    Overflow,
}
