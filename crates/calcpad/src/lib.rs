//! Calcpad - a keypad calculator
//!
//! One calculator engine, three front-ends:
//!
//! - [`core`]: the event-driven state machine (`digit`, `decimalPoint`,
//!   `operator`, `equals`, `clear`, `backspace`) and result formatting
//! - [`web`]: an in-memory calculator page and, with the `wasm` feature,
//!   bindings for a real one
//! - [`tui`] (feature `tui`, on by default): a terminal calculator drawn into
//!   a character grid
//!
//! The [`driver`] module runs one behavioral specification against every
//! front-end.
//!
//! # Example
//!
//! ```rust
//! use calcpad::prelude::*;
//!
//! let mut calc = CalculatorState::new();
//! calc.digit(6);
//! calc.operator(Operator::Add);
//! calc.digit(3);
//! assert_eq!(calc.equals(), "9");
//!
//! // rendering after every event
//! let mut shown = String::new();
//! dispatch(&mut calc, CalcEvent::Operator(Operator::Divide), &mut |text: &str| {
//!     shown = text.to_string();
//! });
//! assert_eq!(shown, "9");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod keypad;

#[cfg(feature = "tui")]
pub mod tui;

/// DOM front-end - the in-memory page is always available for testing
pub mod web;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalcConfig, ConfigError};
    pub use crate::core::{
        dispatch, parse_number, CalcError, CalcEvent, CalcResult, CalculatorState,
        NumberFormat, Operator, Renderer,
    };
    pub use crate::driver::CalculatorDriver;
    pub use crate::keypad::{key_to_event, Keypad, KeypadButton};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    pub use crate::web::{DomDriver, DomElement, DomEvent, MockDom};
}
