use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::driver::driver::Element;
use crate::locator::labels::parse_row;

/// Block type tag used to build block identity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockName {
    Paragraph,
    List,
    Image,
    Gallery,
    Heading,
    More,
    /// Matches a block of any type.
    Any,
}

impl BlockName {
    /// Block types offered by the inserter, in display order.
    pub const INSERTABLE: [BlockName; 6] = [
        BlockName::Paragraph,
        BlockName::Heading,
        BlockName::List,
        BlockName::Image,
        BlockName::Gallery,
        BlockName::More,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockName::Paragraph => "Paragraph",
            BlockName::List => "List",
            BlockName::Image => "Image",
            BlockName::Gallery => "Gallery",
            BlockName::Heading => "Heading",
            BlockName::More => "More",
            BlockName::Any => "",
        }
    }

    /// Whether the block renders an editable text view.
    pub fn has_text(&self) -> bool {
        matches!(
            self,
            BlockName::Paragraph | BlockName::List | BlockName::Heading
        )
    }
}

impl fmt::Display for BlockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockName::Any => write!(f, "Any"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for BlockName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paragraph" => Ok(BlockName::Paragraph),
            "list" => Ok(BlockName::List),
            "image" => Ok(BlockName::Image),
            "gallery" => Ok(BlockName::Gallery),
            "heading" => Ok(BlockName::Heading),
            "more" => Ok(BlockName::More),
            "any" | "" => Ok(BlockName::Any),
            other => Err(format!("unknown block type '{}'", other)),
        }
    }
}

/// A resolved block: the container element plus the accessibility label it
/// carried when it was looked up.
///
/// The row is a render position, not an identity; it goes stale as soon as
/// blocks are inserted, moved, removed, or scrolled out of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub element: Element,
    pub label: String,
}

impl Block {
    pub fn new(element: Element, label: impl Into<String>) -> Self {
        Block {
            element,
            label: label.into(),
        }
    }

    pub fn row(&self) -> Option<u32> {
        parse_row(&self.label)
    }
}
