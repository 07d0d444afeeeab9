use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Env var consulted when neither the CLI nor the config names a platform.
pub const PLATFORM_ENV: &str = "EDITOR_PLATFORM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub fn is_android(&self) -> bool {
        matches!(self, Platform::Android)
    }

    /// Resolve the target platform: explicit value > `EDITOR_PLATFORM` > iOS.
    pub fn detect(explicit: Option<Platform>) -> Platform {
        if let Some(platform) = explicit {
            return platform;
        }
        std::env::var(PLATFORM_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Platform::Ios)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            other => Err(format!("unknown platform '{}' (expected android or ios)", other)),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "android"),
            Platform::Ios => write!(f, "ios"),
        }
    }
}
