//! Number formatting
//!
//! Results are rounded to a fixed number of decimal places, then rendered
//! either as a plain decimal or, past a magnitude threshold, in scientific
//! notation with a fixed number of fractional digits and a signed exponent
//! (`2.000000e+13`).

use serde::{Deserialize, Serialize};

/// Rounding and rendering parameters for evaluation results
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Decimal places kept after rounding
    pub decimal_places: u32,
    /// Magnitude above which results switch to scientific notation
    pub scientific_threshold: f64,
    /// Fractional digits of the scientific mantissa
    pub exponent_digits: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberFormat {
    /// Largest accepted `decimal_places`
    pub const MAX_DECIMAL_PLACES: u32 = 15;
    /// Largest accepted `exponent_digits`
    pub const MAX_EXPONENT_DIGITS: usize = 16;

    /// Ten decimal places, scientific past 1e12 with six mantissa digits
    #[must_use]
    pub const fn new() -> Self {
        Self {
            decimal_places: 10,
            scientific_threshold: 1e12,
            exponent_digits: 6,
        }
    }

    /// Sets the number of decimal places
    #[must_use]
    pub const fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    /// Sets the scientific notation threshold
    #[must_use]
    pub const fn with_scientific_threshold(mut self, threshold: f64) -> Self {
        self.scientific_threshold = threshold;
        self
    }

    /// Sets the mantissa digits used in scientific notation
    #[must_use]
    pub const fn with_exponent_digits(mut self, digits: usize) -> Self {
        self.exponent_digits = digits;
        self
    }

    /// Rounds half-up (towards positive infinity on ties) at the configured
    /// number of decimal places.
    ///
    /// Values whose scaled form is not finite are returned unchanged, and a
    /// negative zero result becomes `0.0`.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let factor = 10f64.powi(self.decimal_places as i32);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        let rounded = round_half_up(scaled) / factor;
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    /// Rounds `value` and renders it for the display
    #[must_use]
    pub fn render(&self, value: f64) -> String {
        let rounded = self.round(value);
        if rounded.abs() > self.scientific_threshold {
            self.render_scientific(rounded)
        } else {
            format!("{rounded}")
        }
    }

    fn render_scientific(&self, value: f64) -> String {
        let text = format!("{:.*e}", self.exponent_digits, value);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        }
    }
}

/// `floor(x + 0.5)` without the precision loss of the addition
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Reads the numeric value of display text.
///
/// The longest leading prefix shaped like a number wins, so `"12."` reads as
/// 12 and `"2.000000e+13"` as 2e13. Text without a numeric prefix (`"-"`,
/// `""`) reads as 0. Operands too large for `f64` read as infinite.
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    let end = numeric_prefix_len(text.as_bytes());
    text[..end].parse::<f64>().unwrap_or(0.0)
}

/// Length of `[+-]digits[.digits][e[+-]digits]` at the start of `bytes`;
/// 0 when there are no mantissa digits
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut mantissa_digits = digits_from(end);
    end += mantissa_digits;
    if bytes.get(end) == Some(&b'.') {
        let fraction = digits_from(end + 1);
        mantissa_digits += fraction;
        end += 1 + fraction;
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exponent_digits = digits_from(exp);
        if exponent_digits > 0 {
            end = exp + exponent_digits;
        }
    }
    end
}
