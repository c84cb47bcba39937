//! Browser bindings
//!
//! The same wiring as [`DomDriver`](super::DomDriver), against the real page:
//! one delegated click listener on `.calculator-buttons`, one `keydown`
//! listener on the document, and `#display` re-rendered after every event.
//! Both listeners are removed when the calculator is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, Event, KeyboardEvent};

use crate::core::{dispatch, CalcEvent, CalculatorState};
use crate::keypad::{event_from_dataset, key_to_event};

/// Calculator attached to the current page
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    state: Rc<RefCell<CalculatorState>>,
    document: Document,
    buttons: Element,
    display: Element,
    on_click: Closure<dyn FnMut(Event)>,
    on_keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Attaches to `#display` (or `.display`) and `.calculator-buttons`
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BrowserCalculator, JsValue> {
        console_error_panic_hook::set_once();

        let document = document()?;
        let display = find_display(&document)?;
        let buttons = document
            .query_selector(".calculator-buttons")?
            .ok_or_else(|| JsValue::from_str("missing .calculator-buttons container"))?;

        let state = Rc::new(RefCell::new(CalculatorState::new()));
        display.set_text_content(Some(state.borrow().display()));

        let on_click = {
            let state = Rc::clone(&state);
            let display = display.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let Some(calc_event) = clicked_event(&event) {
                    fire(&state, &display, calc_event);
                }
            })
        };
        buttons.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        let on_keydown = {
            let state = Rc::clone(&state);
            let display = display.clone();
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                if let Some(calc_event) = key_to_event(&event.key()) {
                    event.prevent_default();
                    fire(&state, &display, calc_event);
                }
            })
        };
        document.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;

        console::log_1(&"Calculator initialized".into());

        Ok(Self {
            state,
            document,
            buttons,
            display,
            on_click,
            on_keydown,
        })
    }

    /// Current display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.state.borrow().display().to_string()
    }

    /// Feeds a key as if typed; returns whether it was handled
    #[wasm_bindgen(js_name = pressKey)]
    pub fn press_key(&self, key: &str) -> bool {
        match key_to_event(key) {
            Some(event) => {
                fire(&self.state, &self.display, event);
                true
            }
            None => false,
        }
    }

    /// Resets the calculator
    pub fn clear(&self) {
        fire(&self.state, &self.display, CalcEvent::Clear);
    }
}

impl Drop for BrowserCalculator {
    fn drop(&mut self) {
        let click = self.buttons.remove_event_listener_with_callback(
            "click",
            self.on_click.as_ref().unchecked_ref(),
        );
        let keydown = self.document.remove_event_listener_with_callback(
            "keydown",
            self.on_keydown.as_ref().unchecked_ref(),
        );
        if click.is_err() || keydown.is_err() {
            console::warn_1(&"Calculator listeners could not be removed".into());
        }
    }
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

fn find_display(document: &Document) -> Result<Element, JsValue> {
    if let Some(display) = document.get_element_by_id("display") {
        return Ok(display);
    }
    document
        .query_selector(".display")?
        .ok_or_else(|| JsValue::from_str("missing #display element"))
}

fn clicked_event(event: &Event) -> Option<CalcEvent> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest("button").ok()??;
    let action = button.get_attribute("data-action")?;
    let value = button.get_attribute("data-value");
    event_from_dataset(&action, value.as_deref())
}

fn fire(state: &RefCell<CalculatorState>, display: &Element, event: CalcEvent) {
    let mut render = |text: &str| display.set_text_content(Some(text));
    dispatch(&mut state.borrow_mut(), event, &mut render);
}

/// Installs the panic hook when the module loads
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
