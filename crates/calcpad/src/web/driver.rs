//! DOM driver
//!
//! Wires a [`CalculatorState`] to a [`MockDom`] the way the page script does:
//! a delegated click handler reading the button dataset and a document-level
//! `keydown` handler, both re-rendering `#display` after every event.

use tracing::debug;

use super::dom::{DomEvent, MockDom, DISPLAY_ID};
use crate::core::{dispatch, CalcEvent, CalculatorState, NumberFormat};
use crate::driver::CalculatorDriver;
use crate::keypad::{event_from_dataset, key_to_event, Keypad};

/// Calculator state plus its page
#[derive(Debug)]
pub struct DomDriver {
    state: CalculatorState,
    dom: MockDom,
    keypad: Keypad,
}

impl Default for DomDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DomDriver {
    /// Creates a driver over a fresh calculator page
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(NumberFormat::default())
    }

    /// Creates a driver with custom result formatting
    #[must_use]
    pub fn with_format(format: NumberFormat) -> Self {
        let keypad = Keypad::new();
        Self {
            state: CalculatorState::with_format(format),
            dom: MockDom::calculator(&keypad),
            keypad,
        }
    }

    /// Returns the calculator state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Returns the page
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Returns the keypad the page was built from
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Text of `#display`
    #[must_use]
    pub fn display_text(&self) -> Option<&str> {
        self.dom.get_element_text(DISPLAY_ID)
    }

    /// Clicks an element. Returns true when the click reached a calculator
    /// button and produced an event.
    pub fn click(&mut self, element_id: &str) -> bool {
        self.dom.dispatch_event(DomEvent::click(element_id));
        let Some(event) = self.event_for_click(element_id) else {
            debug!(element_id, "click ignored");
            return false;
        };
        self.fire(event);
        true
    }

    /// Presses a key on the document. Returns true when the key was handled,
    /// which is when the page prevents the browser default.
    pub fn key_down(&mut self, key: &str) -> bool {
        let event = key_to_event(key);
        self.dom
            .dispatch_event(DomEvent::key_down(key, event.is_some()));
        match event {
            Some(event) => {
                self.fire(event);
                true
            }
            None => false,
        }
    }

    fn event_for_click(&self, element_id: &str) -> Option<CalcEvent> {
        let button = self.dom.get_element(element_id)?;
        if button.tag != "button" {
            return None;
        }
        event_from_dataset(button.data("action")?, button.data("value"))
    }

    fn fire(&mut self, event: CalcEvent) {
        dispatch(&mut self.state, event, &mut self.dom);
    }
}

impl CalculatorDriver for DomDriver {
    fn press_key(&mut self, key: &str) -> bool {
        self.key_down(key)
    }

    fn click_button(&mut self, button_id: &str) -> bool {
        self.click(button_id)
    }

    fn display(&self) -> String {
        self.display_text().unwrap_or_default().to_string()
    }

    fn reset(&mut self) {
        self.fire(CalcEvent::Clear);
        self.dom.clear_event_history();
    }
}
