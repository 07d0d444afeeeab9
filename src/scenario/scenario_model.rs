use serde::{Deserialize, Serialize};

use crate::page::block::BlockName;

/// An editor session described step by step, usually loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Human-readable name for this scenario
    pub name: String,

    /// Title typed into the post before the steps run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Ordered list of steps to execute
    pub steps: Vec<ScenarioStep>,
}

fn default_true() -> bool {
    true
}

/// A single step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Insert a block after the selected one
    AddBlock { block: BlockName },

    /// Type into a paragraph, list or heading block
    SendText {
        block: BlockName,
        position: u32,
        text: String,
        #[serde(default = "default_true")]
        clear: bool,
    },

    MoveUp {
        position: u32,
        #[serde(default = "any_block")]
        block: BlockName,
    },

    MoveDown {
        position: u32,
        #[serde(default = "any_block")]
        block: BlockName,
    },

    Remove {
        position: u32,
        #[serde(default = "any_block")]
        block: BlockName,
    },

    DismissKeyboard,

    /// Toggle the selected list between bulleted and numbered
    OrderedList,

    /// Tap an empty image block to open its media options
    SelectImage { position: u32 },

    ChooseMediaLibrary,

    ImageCaption {
        text: String,
        #[serde(default = "default_true")]
        clear: bool,
    },

    /// Replace the document through the raw HTML view
    SetHtml { html: String },

    /// Run assertions against the current editor state
    Assert { assertions: Vec<Assertion> },
}

fn any_block() -> BlockName {
    BlockName::Any
}

/// A single assertion evaluated against the editor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Text of a paragraph, list or heading block equals `expected`
    BlockText {
        block: BlockName,
        position: u32,
        expected: String,
    },

    BlockPresent { block: BlockName, position: u32 },

    BlockAbsent { block: BlockName, position: u32 },

    /// Raw HTML equals `expected`, ignoring case
    HtmlEquals { expected: String },

    TitleEquals { expected: String },
}

/// Outcome of evaluating a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// Which step this assertion belongs to (0-indexed)
    pub step_index: usize,

    pub assertion: Assertion,

    pub passed: bool,

    /// Actual value found (for debugging failed assertions)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

/// Result of running a complete scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,

    /// Whether all steps and assertions passed
    pub passed: bool,

    pub steps_run: usize,

    pub assertion_results: Vec<AssertionResult>,

    /// Error that aborted the scenario (not an assertion failure)
    pub error: Option<String>,
}
