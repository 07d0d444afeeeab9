use std::fmt;

use serde::Serialize;

/// How an attribute value is compared against the expected text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Matcher {
    Contains(String),
    Equals(String),
    StartsWith(String),
}

impl Matcher {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            Matcher::Contains(expected) => actual.contains(expected.as_str()),
            Matcher::Equals(expected) => actual == expected,
            Matcher::StartsWith(expected) => actual.starts_with(expected.as_str()),
        }
    }

    /// XPath predicate body for `@attribute`, e.g. `contains(@name, "x")`.
    fn predicate(&self, attribute: &str) -> String {
        match self {
            Matcher::Contains(v) => format!("contains(@{}, {})", attribute, quote(v)),
            Matcher::Equals(v) => format!("@{}={}", attribute, quote(v)),
            Matcher::StartsWith(v) => format!("starts-with(@{}, {})", attribute, quote(v)),
        }
    }
}

/// Element query understood by every `AutomationDriver`.
///
/// Appium receives these rendered as XPath (or as an accessibility id);
/// the simulated editor evaluates them structurally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "using", rename_all = "snake_case")]
pub enum Locator {
    /// Exact accessibility identifier (`name` on iOS, `content-desc` on Android)
    AccessibilityId { id: String },

    /// `//class[matcher(@attribute)]`, any class when `class` is None
    Attribute {
        class: Option<String>,
        attribute: String,
        matcher: Matcher,
    },

    /// `ancestor//class`
    Descendant { ancestor: Box<Locator>, class: String },

    /// `anchor/following-sibling::*[//*][matcher(@attribute)]`
    FollowingSibling {
        anchor: Box<Locator>,
        nested: bool,
        attribute: String,
        matcher: Matcher,
    },
}

impl Locator {
    pub fn accessibility_id(id: impl Into<String>) -> Self {
        Locator::AccessibilityId { id: id.into() }
    }

    pub fn attribute(class: Option<&str>, attribute: &str, matcher: Matcher) -> Self {
        Locator::Attribute {
            class: class.map(|c| c.to_string()),
            attribute: attribute.to_string(),
            matcher,
        }
    }

    pub fn descendant(self, class: &str) -> Self {
        Locator::Descendant {
            ancestor: Box::new(self),
            class: class.to_string(),
        }
    }

    pub fn following_sibling(self, nested: bool, attribute: &str, matcher: Matcher) -> Self {
        Locator::FollowingSibling {
            anchor: Box::new(self),
            nested,
            attribute: attribute.to_string(),
            matcher,
        }
    }

    /// WebDriver `using` strategy for this locator.
    pub fn strategy(&self) -> &'static str {
        match self {
            Locator::AccessibilityId { .. } => "accessibility id",
            _ => "xpath",
        }
    }

    /// WebDriver `value` for this locator.
    pub fn value(&self) -> String {
        match self {
            Locator::AccessibilityId { id } => id.clone(),
            other => other.to_xpath(),
        }
    }

    pub fn to_xpath(&self) -> String {
        match self {
            Locator::AccessibilityId { id } => {
                format!("//*[@name={}]", quote(id))
            }
            Locator::Attribute {
                class,
                attribute,
                matcher,
            } => format!(
                "//{}[{}]",
                class.as_deref().unwrap_or("*"),
                matcher.predicate(attribute)
            ),
            Locator::Descendant { ancestor, class } => {
                format!("{}//{}", ancestor.to_xpath(), class)
            }
            Locator::FollowingSibling {
                anchor,
                nested,
                attribute,
                matcher,
            } => format!(
                "{}/following-sibling::*{}[{}]",
                anchor.to_xpath(),
                if *nested { "//*" } else { "" },
                matcher.predicate(attribute)
            ),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::AccessibilityId { id } => write!(f, "~{}", id),
            other => write!(f, "{}", other.to_xpath()),
        }
    }
}

/// XPath 1.0 has no escapes; fall back to concat() when both quote kinds appear.
fn quote(value: &str) -> String {
    if !value.contains('"') {
        format!("\"{}\"", value)
    } else if !value.contains('\'') {
        format!("'{}'", value)
    } else {
        let parts: Vec<String> = value
            .split('"')
            .map(|p| format!("\"{}\"", p))
            .collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}
