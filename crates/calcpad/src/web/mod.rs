//! DOM front-end
//!
//! [`MockDom`] and [`DomDriver`] model the calculator page in memory so the
//! click delegation and keyboard handling can be tested natively.
//! [`BrowserCalculator`] (feature `wasm`) attaches the same handlers to a
//! real page.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use dom::{DomElement, DomEvent, MockDom, BUTTONS_ID, DISPLAY_ID};
pub use driver::DomDriver;
