use serde::{Deserialize, Serialize};

use crate::scenario::scenario_model::ScenarioResult;

/// Aggregated outcome of a batch of scenario runs, consumed by the console
/// and JUnit reporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite_name: String,

    /// Platform the scenarios ran on
    pub platform: String,

    pub total: usize,
    pub passed: usize,
    pub failed: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    pub fn from_results(suite_name: &str, platform: &str, results: Vec<ScenarioResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            suite_name: suite_name.to_string(),
            platform: platform.to_string(),
            total,
            passed,
            failed: total - passed,
            duration_ms: None,
            results,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
