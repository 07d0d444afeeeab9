use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::locator::locator::Locator;

/// One page-object interaction, written as a JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub operation: String,

    pub locator: Option<String>,
    pub attempt: Option<u32>,

    pub outcome: Option<String>,
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn now(step: u64, operation: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step,
            operation: operation.to_string(),
            locator: None,
            attempt: None,
            outcome: None,
            detail: None,
        }
    }

    pub fn with_locator(mut self, locator: &Locator) -> Self {
        self.locator = Some(locator.to_string());
        self
    }

    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = Some(attempt);
        self
    }

    pub fn with_outcome(mut self, outcome: impl ToString) -> Self {
        self.outcome = Some(outcome.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
