use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::locator::locator::Locator;
use crate::page::error::PageError;

/// Opaque reference to a UI element, as handed out by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Element { id: id.into() }
    }
}

/// Finger movement direction. `Up` reveals content further down the
/// document; `Down` reveals content above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Up,
    Down,
}

/// Everything the editor page needs from a mobile automation backend.
///
/// Every call is a blocking round-trip; implementations carry no state the
/// caller has to coordinate.
pub trait AutomationDriver {
    /// How long element lookups wait for a match before giving up.
    fn set_implicit_wait(&mut self, timeout: Duration) -> Result<(), PageError>;

    /// All elements matching the locator; empty when nothing matches.
    fn find_elements(&mut self, locator: &Locator) -> Result<Vec<Element>, PageError>;

    fn click(&mut self, element: &Element) -> Result<(), PageError>;

    fn text(&mut self, element: &Element) -> Result<String, PageError>;

    fn attribute(&mut self, element: &Element, key: &str) -> Result<Option<String>, PageError>;

    fn clear(&mut self, element: &Element) -> Result<(), PageError>;

    fn send_keys(&mut self, element: &Element, text: &str) -> Result<(), PageError>;

    fn is_keyboard_shown(&mut self) -> Result<bool, PageError>;

    /// OS-level keyboard dismissal.
    fn hide_keyboard(&mut self) -> Result<(), PageError>;

    /// Swipe across the screen, or across `within` when given.
    fn swipe(&mut self, direction: SwipeDirection, within: Option<&Element>) -> Result<(), PageError>;

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    /// First match, or `ElementNotFound`.
    fn find_element(&mut self, locator: &Locator) -> Result<Element, PageError> {
        self.find_elements(locator)?
            .into_iter()
            .next()
            .ok_or_else(|| PageError::not_found(locator, "no element matched"))
    }

    /// Replace the element's text content.
    fn set_text(&mut self, element: &Element, text: &str) -> Result<(), PageError> {
        self.clear(element)?;
        self.send_keys(element, text)
    }
}
