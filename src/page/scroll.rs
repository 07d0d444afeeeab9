use std::time::Duration;

use crate::driver::driver::SwipeDirection;

/// Bounds for every scroll-until-visible and swipe-until-visible search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPolicy {
    /// Swipes allowed before the search fails.
    pub max_attempts: u32,

    /// Pause after each swipe so the view can settle.
    pub settle: Duration,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            settle: Duration::from_millis(300),
        }
    }
}

/// Where a row sits relative to the visible window of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDecision {
    /// Already at the top and the row is still above it: the block does not exist.
    Absent,
    /// Inside the window but unmatched: a block exists there, of another type.
    Mismatch,
    Swipe(SwipeDirection),
}

/// Decide how to bring `target` into the visible window `first..=last`.
pub fn decide(target: u32, first: u32, last: u32) -> ScrollDecision {
    if target < first {
        if first == 1 {
            ScrollDecision::Absent
        } else {
            ScrollDecision::Swipe(SwipeDirection::Down)
        }
    } else if target > last {
        ScrollDecision::Swipe(SwipeDirection::Up)
    } else {
        ScrollDecision::Mismatch
    }
}
