use std::fmt;

#[derive(Debug)]
pub enum PageError {
    /// Precondition failed: no block rendered at the requested row
    NoBlockAtPosition { position: u32 },

    /// Move requested past the first or last row
    MoveOutOfBounds { position: u32, direction: String },

    /// Bounded scroll/swipe search gave up
    NotFoundAfterScrolling { target: String, attempts: u32 },

    /// Single-element lookup matched nothing
    ElementNotFound { locator: String, context: String },

    /// Raw HTML view did not match the expected markup
    HtmlMismatch { expected: String, actual: String },

    /// Driver answered with a WebDriver error payload
    DriverProtocol { command: String, error: String },

    /// HTTP transport to the automation server failed
    Http { command: String, source: reqwest::Error },

    /// JSON parsing failed (driver response)
    JsonParse { context: String, source: serde_json::Error },

    /// Invalid configuration or scenario input
    Config(String),
}

impl PageError {
    pub fn not_found(locator: impl ToString, context: impl ToString) -> Self {
        PageError::ElementNotFound {
            locator: locator.to_string(),
            context: context.to_string(),
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NoBlockAtPosition { position } => {
                write!(f, "No Block at position {}", position)
            }
            PageError::MoveOutOfBounds { position, direction } => {
                write!(f, "Cannot move block {} from row {}", direction, position)
            }
            PageError::NotFoundAfterScrolling { target, attempts } => {
                write!(f, "'{}' not found after {} scroll attempts", target, attempts)
            }
            PageError::ElementNotFound { locator, context } => {
                write!(f, "Element '{}' not found: {}", locator, context)
            }
            PageError::HtmlMismatch { expected, actual } => {
                write!(
                    f,
                    "HTML content mismatch\n  expected: {}\n  actual:   {}",
                    expected, actual
                )
            }
            PageError::DriverProtocol { command, error } => {
                write!(f, "Driver command '{}' failed: {}", command, error)
            }
            PageError::Http { command, source } => {
                write!(f, "HTTP error during '{}': {}", command, source)
            }
            PageError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            PageError::Config(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PageError::Http { source, .. } => Some(source),
            PageError::JsonParse { source, .. } => Some(source),
            _ => None,
        }
    }
}
