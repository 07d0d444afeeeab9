//! Accessibility label templates shared by the page object (which builds
//! matchers from them) and the simulated editor (which renders them).

use once_cell::sync::Lazy;
use regex::Regex;

/// Substring present in the label of every block, whatever its type.
pub const ANY_BLOCK_MARKER: &str = " Block. Row ";
pub const TITLE_MARKER: &str = "Post title.";
pub const HTML_VIEW_CONTENT_ID: &str = "html-view-content";
pub const IMAGE_CAPTION_PREFIX: &str = "Image caption.";
pub const MEDIA_LIBRARY_ID: &str = "WordPress Media Library";
pub const ORDERED_LIST_ID: &str = "Ordered";
pub const SWITCH_TO_HTML_ID: &str = "Switch to HTML";
pub const SWITCH_TO_VISUAL_ID: &str = "Switch to Visual";
pub const HIDE_KEYBOARD_ID: &str = "Hide keyboard";

static ROW_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Row (\d+)\.").expect("row pattern is valid"));

/// `"<Name> Block. Row <N>."`; an empty name yields the any-block form.
pub fn block_label(block_name: &str, row: u32) -> String {
    format!("{}{}{}.", block_name, ANY_BLOCK_MARKER, row)
}

pub fn move_up_label(row: u32) -> String {
    format!("Move block up from row {} to row {}", row, row.saturating_sub(1))
}

pub fn move_down_label(row: u32) -> String {
    format!("Move block down from row {} to row {}", row, row + 1)
}

pub fn remove_label(row: u32) -> String {
    format!("Remove block at row {}", row)
}

pub fn title_label(title: &str) -> String {
    if title.is_empty() {
        format!("{} Empty", TITLE_MARKER)
    } else {
        format!("{} {}", TITLE_MARKER, title)
    }
}

pub fn caption_label(caption: &str) -> String {
    if caption.is_empty() {
        format!("{} Empty", IMAGE_CAPTION_PREFIX)
    } else {
        format!("{} {}", IMAGE_CAPTION_PREFIX, caption)
    }
}

/// Row number carried by a block label, if any.
pub fn parse_row(label: &str) -> Option<u32> {
    ROW_PATTERN
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
