//! Locators the page object sends, built from a platform strategy. The
//! `locators` command prints these same values.

use crate::locator::labels::{
    ANY_BLOCK_MARKER, TITLE_MARKER, block_label, remove_label,
};
use crate::locator::locator::{Locator, Matcher};
use crate::page::block::BlockName;
use crate::platform::strategy::PlatformStrategy;

/// Container of the block rendered at `position`.
pub fn block(strategy: &dyn PlatformStrategy, block_name: BlockName, position: u32) -> Locator {
    Locator::attribute(
        None,
        strategy.xpath_attribute(),
        Matcher::Contains(block_label(block_name.as_str(), position)),
    )
}

/// Every rendered block container.
pub fn any_block(strategy: &dyn PlatformStrategy) -> Locator {
    Locator::attribute(
        None,
        strategy.xpath_attribute(),
        Matcher::Contains(ANY_BLOCK_MARKER.to_string()),
    )
}

/// Move-up or move-down control next to the block, matched by its exact label.
pub fn move_control(
    strategy: &dyn PlatformStrategy,
    block_name: BlockName,
    position: u32,
    label: String,
) -> Locator {
    block(strategy, block_name, position).following_sibling(
        strategy.nested_block_controls(),
        strategy.xpath_attribute(),
        Matcher::Equals(label),
    )
}

pub fn remove_control(strategy: &dyn PlatformStrategy, position: u32) -> Locator {
    Locator::attribute(
        strategy.button_class(),
        strategy.xpath_attribute(),
        Matcher::Equals(remove_label(position)),
    )
}

/// Text view of `class` inside the block whose label is exactly `label`.
///
/// Typed content is appended to a block's label, so callers pass the label
/// as currently rendered.
pub fn text_view(strategy: &dyn PlatformStrategy, label: &str, class: &str) -> Locator {
    Locator::attribute(None, strategy.xpath_attribute(), Matcher::Equals(label.to_string()))
        .descendant(class)
}

pub fn title(strategy: &dyn PlatformStrategy) -> Locator {
    Locator::attribute(
        None,
        strategy.xpath_attribute(),
        Matcher::Contains(TITLE_MARKER.to_string()),
    )
}
