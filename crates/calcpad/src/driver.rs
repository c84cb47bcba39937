//! Unified calculator driver
//!
//! Every front-end is driven through [`CalculatorDriver`], and the `verify_*`
//! functions below describe the calculator's behavior once, in terms of key
//! presses and button clicks. Each front-end's test module runs the same
//! functions against its own driver.

use crate::core::{ERROR_TEXT, INITIAL_TEXT};

/// Interaction surface shared by every front-end
///
/// Keys use browser `KeyboardEvent.key` names (`"7"`, `"+"`, `"Enter"`,
/// `"Escape"`, `"Backspace"`); buttons use keypad element ids (`"btn-7"`,
/// `"btn-plus"`, `"btn-equals"`).
///
/// # Example
///
/// ```rust
/// use calcpad::driver::CalculatorDriver;
/// use calcpad::web::DomDriver;
///
/// let mut driver = DomDriver::new();
/// for key in ["6", "*", "7", "Enter"] {
///     driver.press_key(key);
/// }
/// assert_eq!(driver.display(), "42");
/// ```
pub trait CalculatorDriver {
    /// Presses a key. Returns true when the key mapped to a calculator event.
    fn press_key(&mut self, key: &str) -> bool;

    /// Clicks a keypad button by id. Returns true when the click fired an event.
    fn click_button(&mut self, button_id: &str) -> bool;

    /// Text the front-end currently shows
    fn display(&self) -> String;

    /// Returns the calculator to its initial state
    fn reset(&mut self);

    /// Presses each key in order
    fn press_keys(&mut self, keys: &[&str]) {
        for key in keys {
            self.press_key(key);
        }
    }
}

/// Terminal driver
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::CalculatorDriver;
    use crate::core::CalcEvent;
    use crate::tui::{
        key_code_from_name, render, CalculatorApp, InputHandler, KeyAction, KeypadLayout, TextGrid,
    };

    /// Drives a [`CalculatorApp`] through synthetic terminal input
    #[derive(Debug)]
    pub struct TuiDriver {
        app: CalculatorApp,
        input: InputHandler,
    }

    impl Default for TuiDriver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TuiDriver {
        /// Creates a driver over a default app
        #[must_use]
        pub fn new() -> Self {
            Self::with_app(CalculatorApp::new())
        }

        /// Creates a driver over an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self {
                app,
                input: InputHandler::new(),
            }
        }

        /// Returns the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns the underlying app mutably
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }

        /// Renders the current frame at the app's viewport size
        #[must_use]
        pub fn frame(&self) -> TextGrid {
            let (width, height) = self.app.viewport();
            render(&self.app, width, height)
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press_key(&mut self, key: &str) -> bool {
            let Some(code) = key_code_from_name(key) else {
                return false;
            };
            match self.input.handle_key(KeyEvent::new(code, KeyModifiers::NONE)) {
                action @ KeyAction::Calc(_) => self.app.handle_action(action),
                KeyAction::Quit | KeyAction::None => false,
            }
        }

        fn click_button(&mut self, button_id: &str) -> bool {
            let (width, height) = self.app.viewport();
            let keypad = self.app.keypad();
            let center = KeypadLayout::for_frame(keypad, width, height, self.app.show_help())
                .and_then(|layout| {
                    let button = keypad.find_button_by_id(button_id)?;
                    layout.cell(button.row, button.col)
                })
                .map(|cell| cell.center());
            match center {
                Some((x, y)) => self.app.click_at(x, y),
                None => false,
            }
        }

        fn display(&self) -> String {
            self.app.state().display().to_string()
        }

        fn reset(&mut self) {
            self.app.handle_action(KeyAction::Calc(CalcEvent::Clear));
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified specifications =====
// Each runs against any CalculatorDriver implementation

/// Digits append; a lone leading zero is replaced
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    assert_eq!(driver.display(), INITIAL_TEXT);

    driver.press_keys(&["1", "2", "3"]);
    assert_eq!(driver.display(), "123");

    driver.reset();
    driver.press_keys(&["0", "0", "7"]);
    assert_eq!(driver.display(), "7");
}

/// One decimal point per operand
pub fn verify_decimal_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys(&["3", ".", "1", ".", "4"]);
    assert_eq!(driver.display(), "3.14");

    driver.reset();
    driver.press_key(".");
    assert_eq!(driver.display(), "0.");

    // a point after an operator starts a fresh operand
    driver.press_keys(&["5", "+", "."]);
    assert_eq!(driver.display(), "0.");
    driver.press_keys(&["5", "Enter"]);
    assert_eq!(driver.display(), "1");
}

/// The four operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [
        (["2", "+", "3"], "5"),
        (["9", "-", "4"], "5"),
        (["6", "*", "7"], "42"),
        (["8", "/", "4"], "2"),
    ] {
        driver.reset();
        driver.press_keys(&keys);
        driver.press_key("Enter");
        assert_eq!(driver.display(), expected, "{keys:?}");
    }

    driver.reset();
    driver.press_keys(&["3", "-", "8", "Enter"]);
    assert_eq!(driver.display(), "-5");
}

/// A second operator evaluates the pending operation left to right
pub fn verify_chained_evaluation<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys(&["2", "+", "3", "*"]);
    assert_eq!(driver.display(), "5");
    driver.press_keys(&["4", "Enter"]);
    assert_eq!(driver.display(), "20");

    // replacing an operator does not evaluate
    driver.reset();
    driver.press_keys(&["9", "+", "-", "4", "Enter"]);
    assert_eq!(driver.display(), "5");

    // a result feeds the next operation
    driver.press_keys(&["*", "3", "Enter"]);
    assert_eq!(driver.display(), "15");
}

/// Division by zero shows the error marker until new input
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys(&["5", "/", "0", "Enter"]);
    assert_eq!(driver.display(), ERROR_TEXT);

    driver.press_key("7");
    assert_eq!(driver.display(), "7");
}

/// Backspace removes the last character, bottoming out at zero
pub fn verify_backspace<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys(&["1", "2", "3", "Backspace"]);
    assert_eq!(driver.display(), "12");

    driver.press_keys(&["Backspace", "Backspace"]);
    assert_eq!(driver.display(), INITIAL_TEXT);
    driver.press_key("Backspace");
    assert_eq!(driver.display(), INITIAL_TEXT);

    driver.press_keys(&["4", "+", "4", "Enter", "Backspace"]);
    assert_eq!(driver.display(), INITIAL_TEXT);
}

/// Clear drops the pending operation as well as the display
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys(&["9", "+", "1", "Escape"]);
    assert_eq!(driver.display(), INITIAL_TEXT);

    driver.press_keys(&["2", "Enter"]);
    assert_eq!(driver.display(), "2");

    driver.press_keys(&["5", "c"]);
    assert_eq!(driver.display(), INITIAL_TEXT);
}

/// Results are rounded to ten decimal places
pub fn verify_rounding<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys(&["1", "/", "3", "Enter"]);
    assert_eq!(driver.display(), "0.3333333333");

    driver.reset();
    driver.press_keys(&[".", "1", "+", ".", "2", "Enter"]);
    assert_eq!(driver.display(), "0.3");

    driver.reset();
    driver.press_keys(&["2", "/", "3", "Enter"]);
    assert_eq!(driver.display(), "0.6666666667");
}

/// Results above the threshold switch to exponent notation
pub fn verify_scientific_notation<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys(&["9", "9", "9", "9", "9", "9", "9", "*"]);
    driver.press_keys(&["9", "9", "9", "9", "9", "9", "9", "Enter"]);
    assert_eq!(driver.display(), "9.999998e+13");

    // exactly one trillion is not above the threshold
    driver.reset();
    driver.press_keys(&["1", "0", "0", "0", "0", "0", "0", "*"]);
    driver.press_keys(&["1", "0", "0", "0", "0", "0", "0", "Enter"]);
    assert_eq!(driver.display(), "1000000000000");
}

/// Keypad buttons drive the calculator like their keys
pub fn verify_button_clicks<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    for id in ["btn-7", "btn-times", "btn-6", "btn-equals"] {
        assert!(driver.click_button(id), "click {id}");
    }
    assert_eq!(driver.display(), "42");

    assert!(driver.click_button("btn-backspace"));
    assert_eq!(driver.display(), INITIAL_TEXT);

    assert!(!driver.click_button("btn-missing"));
    assert_eq!(driver.display(), INITIAL_TEXT);

    driver.click_button("btn-1");
    driver.click_button("btn-decimal");
    driver.click_button("btn-5");
    assert_eq!(driver.display(), "1.5");
    assert!(driver.click_button("btn-clear"));
    assert_eq!(driver.display(), INITIAL_TEXT);
}

/// Runs every specification above
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_entry(driver);
    verify_decimal_entry(driver);
    verify_basic_arithmetic(driver);
    verify_chained_evaluation(driver);
    verify_division_by_zero(driver);
    verify_backspace(driver);
    verify_clear(driver);
    verify_rounding(driver);
    verify_scientific_notation(driver);
    verify_button_clicks(driver);
}
