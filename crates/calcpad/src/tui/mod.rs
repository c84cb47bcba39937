//! Terminal front-end
//!
//! Crossterm key and mouse events are mapped onto the shared keypad and event
//! vocabulary; frames are drawn into a [`TextGrid`] that the binary flushes to
//! the terminal.

mod app;
mod grid;
mod input;
mod ui;

pub use app::CalculatorApp;
pub use grid::{Rect, TextGrid};
pub use input::{key_code_from_name, key_name, InputHandler, KeyAction};
pub use ui::{render, KeypadLayout, HELP_TEXT, MIN_HEIGHT, MIN_WIDTH, TITLE};
