//! Terminal application state

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use super::input::{InputHandler, KeyAction};
use super::ui::KeypadLayout;
use crate::config::CalcConfig;
use crate::core::{CalcEvent, CalculatorState};
use crate::keypad::Keypad;

/// Calculator state plus what the terminal shows around it
#[derive(Debug)]
pub struct CalculatorApp {
    state: CalculatorState,
    keypad: Keypad,
    input: InputHandler,
    /// Keypad index of the last button fired, highlighted until the next event
    pressed: Option<usize>,
    show_help: bool,
    viewport: (u16, u16),
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates an app with default settings and an 80x24 viewport
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalcConfig::default())
    }

    /// Creates an app from a configuration
    #[must_use]
    pub fn with_config(config: &CalcConfig) -> Self {
        Self {
            state: CalculatorState::with_format(config.format),
            keypad: Keypad::new(),
            input: InputHandler::new(),
            pressed: None,
            show_help: config.tui.show_help,
            viewport: (80, 24),
            should_quit: false,
        }
    }

    /// Returns the calculator state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Index of the highlighted button
    #[must_use]
    pub fn pressed_button(&self) -> Option<usize> {
        self.pressed
    }

    /// Whether the help line is drawn
    #[must_use]
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Shows or hides the help line
    pub fn set_show_help(&mut self, show: bool) {
        self.show_help = show;
    }

    /// Terminal size used for hit testing
    #[must_use]
    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    /// Records the terminal size
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handles a key press. Returns true when the frame needs redrawing.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        let action = self.input.handle_key(event);
        self.handle_action(action)
    }

    /// Applies an action. Returns true when the frame needs redrawing.
    pub fn handle_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Calc(event) => {
                self.fire(event);
                true
            }
            KeyAction::Quit => {
                self.quit();
                true
            }
            KeyAction::None => false,
        }
    }

    /// Handles a mouse event; only left-button presses act
    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click_at(event.column, event.row),
            _ => false,
        }
    }

    /// Clicks the screen cell `(x, y)`. Returns true when a button was hit.
    pub fn click_at(&mut self, x: u16, y: u16) -> bool {
        let (width, height) = self.viewport;
        let Some(layout) = KeypadLayout::for_frame(&self.keypad, width, height, self.show_help)
        else {
            return false;
        };
        let event = layout
            .hit_test(x, y)
            .and_then(|(row, col)| self.keypad.get_button_at(row, col))
            .map(|button| button.event);
        match event {
            Some(event) => {
                debug!(x, y, %event, "keypad click");
                self.fire(event);
                true
            }
            None => false,
        }
    }

    fn fire(&mut self, event: CalcEvent) {
        self.state.apply(event);
        self.pressed = self.keypad.index_of_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NumberFormat, Operator};
    use crate::tui::render;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn center_of(app: &CalculatorApp, id: &str) -> (u16, u16) {
        let (width, height) = app.viewport();
        let layout = KeypadLayout::for_frame(app.keypad(), width, height, app.show_help()).unwrap();
        let button = app.keypad().find_button_by_id(id).unwrap();
        layout.cell(button.row, button.col).unwrap().center()
    }

    // ===== Constructor tests =====

    #[test]
    fn test_app_new() {
        let app = CalculatorApp::new();
        assert_eq!(app.state().display(), "0");
        assert_eq!(app.pressed_button(), None);
        assert!(app.show_help());
        assert_eq!(app.viewport(), (80, 24));
        assert!(!app.should_quit());
    }

    #[test]
    fn test_app_with_config() {
        let mut config = CalcConfig::default();
        config.tui.show_help = false;
        config.format = NumberFormat::new().with_decimal_places(1);
        let app = CalculatorApp::with_config(&config);
        assert!(!app.show_help());
        assert_eq!(app.state().format().decimal_places, 1);
    }

    // ===== Keyboard tests =====

    #[test]
    fn test_handle_keys_evaluates() {
        let mut app = CalculatorApp::new();
        for code in [
            KeyCode::Char('6'),
            KeyCode::Char('+'),
            KeyCode::Char('3'),
            KeyCode::Enter,
        ] {
            assert!(app.handle_key(key(code)));
        }
        assert_eq!(app.state().display(), "9");
    }

    #[test]
    fn test_handle_key_highlights_button() {
        let mut app = CalculatorApp::new();
        app.handle_key(key(KeyCode::Char('5')));
        let pressed = app.pressed_button().unwrap();
        assert_eq!(app.keypad().get_button(pressed).unwrap().id, "btn-5");
        app.handle_key(key(KeyCode::Enter));
        let pressed = app.pressed_button().unwrap();
        assert_eq!(app.keypad().get_button(pressed).unwrap().id, "btn-equals");
    }

    #[test]
    fn test_handle_key_ignored() {
        let mut app = CalculatorApp::new();
        assert!(!app.handle_key(key(KeyCode::Tab)));
        assert_eq!(app.state().display(), "0");
    }

    #[test]
    fn test_handle_key_quit() {
        let mut app = CalculatorApp::new();
        assert!(app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.should_quit());
    }

    #[test]
    fn test_handle_action_none() {
        let mut app = CalculatorApp::new();
        assert!(!app.handle_action(KeyAction::None));
    }

    // ===== Mouse tests =====

    #[test]
    fn test_click_buttons() {
        let mut app = CalculatorApp::new();
        for id in ["btn-7", "btn-times", "btn-6", "btn-equals"] {
            let (x, y) = center_of(&app, id);
            assert!(app.click_at(x, y), "click {id}");
        }
        assert_eq!(app.state().display(), "42");
    }

    #[test]
    fn test_click_outside_keypad() {
        let mut app = CalculatorApp::new();
        assert!(!app.click_at(5, 1));
        assert!(!app.click_at(500, 500));
    }

    #[test]
    fn test_click_empty_cell_of_last_row() {
        let mut app = CalculatorApp::new();
        let (width, height) = app.viewport();
        let layout = KeypadLayout::for_frame(app.keypad(), width, height, true).unwrap();
        let (x, y) = layout.cell(4, 3).unwrap().center();
        assert!(!app.click_at(x, y));
    }

    #[test]
    fn test_click_too_small_viewport() {
        let mut app = CalculatorApp::new();
        app.set_viewport(10, 5);
        assert!(!app.click_at(2, 2));
    }

    #[test]
    fn test_click_follows_viewport() {
        let mut app = CalculatorApp::new();
        app.set_viewport(30, 14);
        let (x, y) = center_of(&app, "btn-9");
        assert!(app.click_at(x, y));
        assert_eq!(app.state().display(), "9");
    }

    #[test]
    fn test_handle_mouse_left_down() {
        let mut app = CalculatorApp::new();
        let (x, y) = center_of(&app, "btn-3");
        assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y)));
        assert_eq!(app.state().display(), "3");
    }

    #[test]
    fn test_handle_mouse_other_events_ignored() {
        let mut app = CalculatorApp::new();
        let (x, y) = center_of(&app, "btn-3");
        assert!(!app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x, y)));
        assert!(!app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right), x, y)));
        assert!(!app.handle_mouse(mouse(MouseEventKind::Moved, x, y)));
        assert_eq!(app.state().display(), "0");
    }

    #[test]
    fn test_clicked_button_drawn_under_cursor() {
        let mut app = CalculatorApp::new();
        let (x, y) = center_of(&app, "btn-plus");
        app.click_at(x, y);
        assert_eq!(app.state().pending_operator(), Some(Operator::Add));
        let grid = render(&app, 80, 24);
        let line = &grid.to_lines()[y as usize];
        assert!(line.contains("<+>"));
    }
}
