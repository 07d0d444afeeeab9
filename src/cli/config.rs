use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::page::editor_page::{DEFAULT_IMPLICIT_WAIT_MS, PageOptions};
use crate::page::scroll::ScrollPolicy;
use crate::platform::platform::Platform;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "editor-page",
    version,
    about = "Drive the mobile block editor through its accessibility tree"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Target platform: android or ios
    #[arg(long, global = true)]
    pub platform: Option<Platform>,

    /// Appium server URL
    #[arg(long, global = true)]
    pub appium_url: Option<String>,

    /// JSONL trace output path
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: editor-page.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run editor scenarios from YAML files
    Run {
        /// Path to a scenario YAML file or a directory of them
        #[arg(long)]
        scenario: String,

        /// Driver backend: appium or simulator
        #[arg(long, default_value = "appium")]
        driver: String,

        /// Output format: console, junit
        #[arg(long, default_value = "console")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the locators used for a block row on the selected platform
    Locators {
        /// Block type, e.g. paragraph, list, heading
        #[arg(long, default_value = "any")]
        block: String,

        /// 1-based row
        #[arg(long, default_value_t = 1)]
        position: u32,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `editor-page.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub appium: AppiumConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppiumConfig {
    pub url: Option<String>,

    /// Capabilities merged into the session request
    #[serde(default)]
    pub capabilities: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_implicit_wait")]
    pub implicit_wait_ms: u64,

    #[serde(default = "default_settle")]
    pub keyboard_settle_ms: u64,

    #[serde(default = "default_settle")]
    pub type_settle_ms: u64,

    #[serde(default = "default_scroll_settle")]
    pub scroll_settle_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            implicit_wait_ms: DEFAULT_IMPLICIT_WAIT_MS,
            keyboard_settle_ms: 1000,
            type_settle_ms: 1000,
            scroll_settle_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { max_attempts: 10 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_implicit_wait() -> u64 { DEFAULT_IMPLICIT_WAIT_MS }
fn default_settle() -> u64 { 1000 }
fn default_scroll_settle() -> u64 { 300 }
fn default_max_attempts() -> u32 { 10 }

pub const DEFAULT_APPIUM_URL: &str = "http://127.0.0.1:4723";

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("editor-page.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            eprintln!("Warning: ignoring malformed config '{}': {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Resolve the platform: CLI > config file > EDITOR_PLATFORM > iOS.
pub fn resolve_platform(cli: Option<Platform>, config: &AppConfig) -> Platform {
    Platform::detect(cli.or(config.platform))
}

pub fn build_page_options(platform: Platform, config: &AppConfig) -> PageOptions {
    PageOptions {
        platform,
        implicit_wait: Duration::from_millis(config.timing.implicit_wait_ms),
        keyboard_settle: Duration::from_millis(config.timing.keyboard_settle_ms),
        type_settle: Duration::from_millis(config.timing.type_settle_ms),
        scroll: ScrollPolicy {
            max_attempts: config.scroll.max_attempts,
            settle: Duration::from_millis(config.timing.scroll_settle_ms),
        },
    }
}

/// Session capabilities: platform defaults overlaid with configured ones.
pub fn build_capabilities(platform: Platform, config: &AppConfig) -> Value {
    let mut caps = serde_json::Map::new();
    let (name, automation) = match platform {
        Platform::Android => ("Android", "UiAutomator2"),
        Platform::Ios => ("iOS", "XCUITest"),
    };
    caps.insert("platformName".into(), Value::String(name.into()));
    caps.insert("appium:automationName".into(), Value::String(automation.into()));

    if let Some(Value::Object(extra)) = &config.appium.capabilities {
        for (key, value) in extra {
            caps.insert(key.clone(), value.clone());
        }
    }
    Value::Object(caps)
}
