//! Arithmetic operators
//!
//! Type-safe operator enum; symbols coming from buttons or keys are parsed
//! into it once, at the front-end boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// The four operators the keypad offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the ASCII symbol, as typed on a keyboard
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Returns the name used in element ids (`btn-plus`, ...)
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Subtract => "minus",
            Self::Multiply => "times",
            Self::Divide => "divide",
        }
    }

    /// Parses a keyboard symbol. Only the ASCII symbols map.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Parses a button value: ASCII symbols plus the typographic `× ÷ −`
    /// that button labels tend to carry.
    #[must_use]
    pub fn from_button_value(value: &str) -> Option<Self> {
        let mut chars = value.trim().chars();
        let symbol = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match symbol {
            '×' => Some(Self::Multiply),
            '÷' => Some(Self::Divide),
            '−' => Some(Self::Subtract),
            other => Self::from_symbol(other),
        }
    }

    /// Applies the operator to `lhs` and `rhs`
    pub fn apply(&self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                lhs / rhs
            }
        };
        Self::check_overflow(result)
    }

    fn check_overflow(result: f64) -> CalcResult<f64> {
        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::Overflow)
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_button_value(s).ok_or_else(|| format!("unknown operator '{s}'"))
    }
}
