use std::fmt::Debug;

use crate::driver::driver::AutomationDriver;
use crate::locator::labels::HIDE_KEYBOARD_ID;
use crate::locator::locator::{Locator, Matcher};
use crate::page::error::PageError;
use crate::platform::platform::Platform;

/// Per-platform capability set consumed by every locator builder.
///
/// One strategy is chosen when the page object is constructed; nothing
/// downstream branches on the platform directly.
pub trait PlatformStrategy: Debug + Send + Sync {
    fn platform(&self) -> Platform;

    /// Attribute name passed to `AutomationDriver::attribute`.
    fn attribute_key(&self) -> &'static str;

    /// Attribute name as it appears in XPath predicates.
    fn xpath_attribute(&self) -> &'static str;

    /// Native class of editable text views.
    fn text_view_class(&self) -> &'static str;

    /// Native class of a heading that has no content yet.
    fn empty_heading_class(&self) -> &'static str;

    /// Native class of buttons, None when any element can carry the label.
    fn button_class(&self) -> Option<&'static str>;

    fn add_block_id(&self) -> &'static str;

    fn more_options_id(&self) -> &'static str;

    /// Move controls sit below the block's sibling container rather than on it.
    fn nested_block_controls(&self) -> bool;

    /// The remove control only appears after swiping the block.
    fn remove_control_needs_swipe(&self) -> bool;

    /// The inserter lists block types in a scroll view that must be swiped.
    fn inserter_needs_scroll(&self) -> bool;

    fn dismiss_keyboard(&self, driver: &mut dyn AutomationDriver) -> Result<(), PageError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidStrategy;

impl PlatformStrategy for AndroidStrategy {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn attribute_key(&self) -> &'static str {
        "contentDescription"
    }

    fn xpath_attribute(&self) -> &'static str {
        "content-desc"
    }

    fn text_view_class(&self) -> &'static str {
        "android.widget.EditText"
    }

    fn empty_heading_class(&self) -> &'static str {
        "android.widget.EditText"
    }

    fn button_class(&self) -> Option<&'static str> {
        None
    }

    fn add_block_id(&self) -> &'static str {
        "Add block, Double tap to add a block"
    }

    fn more_options_id(&self) -> &'static str {
        "Button More options"
    }

    fn nested_block_controls(&self) -> bool {
        false
    }

    fn remove_control_needs_swipe(&self) -> bool {
        true
    }

    fn inserter_needs_scroll(&self) -> bool {
        true
    }

    fn dismiss_keyboard(&self, driver: &mut dyn AutomationDriver) -> Result<(), PageError> {
        driver.hide_keyboard()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IosStrategy;

impl PlatformStrategy for IosStrategy {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn attribute_key(&self) -> &'static str {
        "name"
    }

    fn xpath_attribute(&self) -> &'static str {
        "name"
    }

    fn text_view_class(&self) -> &'static str {
        "XCUIElementTypeTextView"
    }

    fn empty_heading_class(&self) -> &'static str {
        "XCUIElementTypeStaticText"
    }

    fn button_class(&self) -> Option<&'static str> {
        Some("XCUIElementTypeButton")
    }

    fn add_block_id(&self) -> &'static str {
        "Add block"
    }

    fn more_options_id(&self) -> &'static str {
        "more_post_options"
    }

    fn nested_block_controls(&self) -> bool {
        true
    }

    fn remove_control_needs_swipe(&self) -> bool {
        false
    }

    fn inserter_needs_scroll(&self) -> bool {
        false
    }

    fn dismiss_keyboard(&self, driver: &mut dyn AutomationDriver) -> Result<(), PageError> {
        let locator = Locator::attribute(
            self.button_class(),
            self.xpath_attribute(),
            Matcher::Equals(HIDE_KEYBOARD_ID.to_string()),
        );
        let button = driver.find_element(&locator)?;
        driver.click(&button)
    }
}

pub fn strategy_for(platform: Platform) -> Box<dyn PlatformStrategy> {
    match platform {
        Platform::Android => Box::new(AndroidStrategy),
        Platform::Ios => Box::new(IosStrategy),
    }
}
