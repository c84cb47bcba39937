//! In-memory DOM
//!
//! Just enough of a document to drive the calculator page without a browser:
//! elements with ids, classes, attributes and text, plus a log of the events
//! dispatched against them.

use std::collections::HashMap;

use crate::core::Renderer;
use crate::keypad::Keypad;

/// Element id of the display
pub const DISPLAY_ID: &str = "display";

/// Element id (and class) of the button container
pub const BUTTONS_ID: &str = "calculator-buttons";

/// A DOM element
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Attributes (`data-action`, `type`, ...)
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates an element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content.clear();
        self.text_content.push_str(text);
    }

    /// Adds a class once
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Gets a `data-*` attribute (`data("action")` reads `data-action`)
    #[must_use]
    pub fn data(&self, name: &str) -> Option<&str> {
        self.get_attr(&format!("data-{name}"))
    }
}

/// Events dispatched against the DOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// `keydown` on the document
    KeyDown {
        /// `KeyboardEvent.key`
        key: String,
        /// Whether the handler called `preventDefault`
        default_prevented: bool,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a keydown event
    #[must_use]
    pub fn key_down(key: &str, default_prevented: bool) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            default_prevented,
        }
    }
}

/// In-memory document
#[derive(Debug)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Dispatched events, oldest first
    event_history: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty document
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id("root"),
            elements: HashMap::new(),
            event_history: Vec::new(),
        }
    }

    /// Builds the calculator page: a `#display` showing `0` and a
    /// `.calculator-buttons` container with one `<button>` per keypad entry
    #[must_use]
    pub fn calculator(keypad: &Keypad) -> Self {
        let mut dom = Self::new();

        let display = DomElement::new("div")
            .with_id(DISPLAY_ID)
            .with_class("display")
            .with_text(crate::core::INITIAL_TEXT);

        let buttons: Vec<DomElement> = keypad
            .buttons()
            .iter()
            .map(|btn| {
                let (action, value) = btn.dataset();
                let elem = DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.label())
                    .with_class("btn")
                    .with_attr("type", "button")
                    .with_attr("data-action", action);
                match value {
                    Some(value) => elem.with_attr("data-value", &value),
                    None => elem,
                }
            })
            .collect();

        let mut container = DomElement::new("div")
            .with_id(BUTTONS_ID)
            .with_class(BUTTONS_ID);
        for button in &buttons {
            container = container.with_child(button.clone());
        }

        dom.root = DomElement::new("div")
            .with_id("calculator")
            .with_class("calculator")
            .with_child(display.clone())
            .with_child(container.clone());

        dom.register_element(display);
        dom.register_element(container);
        for button in buttons {
            dom.register_element(button);
        }

        dom
    }

    /// Registers an element for ID lookup; elements without an ID are skipped
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// First registered element carrying `class`, in ID order
    #[must_use]
    pub fn query_class(&self, class: &str) -> Option<&DomElement> {
        let mut matches: Vec<&DomElement> = self
            .elements
            .values()
            .filter(|e| e.has_class(class))
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        matches.into_iter().next()
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }
}

impl Renderer for MockDom {
    fn render(&mut self, display_text: &str) {
        self.set_element_text(DISPLAY_ID, display_text);
    }
}
