//! Locators: a selector strategy paired with a value.
//!
//! Every strategy lowers to exactly one native query, either a CSS selector
//! or an XPath expression, so drivers only need to understand those two.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy used to address a DOM element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// `id` attribute
    Id,
    /// `name` attribute
    Name,
    /// CSS selector
    Css,
    /// XPath expression
    XPath,
    /// Single class name
    ClassName,
    /// Element tag name
    TagName,
    /// Exact (whitespace-normalised) anchor text
    LinkText,
    /// Substring of anchor text
    PartialLinkText,
}

impl Strategy {
    /// All strategies, in declaration order
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::Name,
        Self::Css,
        Self::XPath,
        Self::ClassName,
        Self::TagName,
        Self::LinkText,
        Self::PartialLinkText,
    ];

    /// Short name used in log lines and error messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Css => "css",
            Self::XPath => "xpath",
            Self::ClassName => "class name",
            Self::TagName => "tag name",
            Self::LinkText => "link text",
            Self::PartialLinkText => "partial link text",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Native query a driver can evaluate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
}

impl Query {
    /// The raw selector/expression text
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }
}

/// A `(strategy, value)` pair, built per lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    strategy: Strategy,
    value: String,
}

impl Locator {
    /// Create a locator from a strategy and value
    #[must_use]
    pub fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    /// Locate by `id` attribute
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::new(Strategy::Id, value)
    }

    /// Locate by `name` attribute
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self::new(Strategy::Name, value)
    }

    /// Locate by CSS selector
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self::new(Strategy::Css, value)
    }

    /// Locate by XPath expression
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, value)
    }

    /// Locate by class name
    #[must_use]
    pub fn class_name(value: impl Into<String>) -> Self {
        Self::new(Strategy::ClassName, value)
    }

    /// Locate by tag name
    #[must_use]
    pub fn tag_name(value: impl Into<String>) -> Self {
        Self::new(Strategy::TagName, value)
    }

    /// Locate an anchor by its full text
    #[must_use]
    pub fn link_text(value: impl Into<String>) -> Self {
        Self::new(Strategy::LinkText, value)
    }

    /// Locate an anchor by part of its text
    #[must_use]
    pub fn partial_link_text(value: impl Into<String>) -> Self {
        Self::new(Strategy::PartialLinkText, value)
    }

    /// Get the strategy
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get the value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Lower this locator to the native query a driver evaluates
    #[must_use]
    pub fn to_query(&self) -> Query {
        let v = self.value.as_str();
        match self.strategy {
            Strategy::Id => Query::Css(format!("[id={}]", css_string(v))),
            Strategy::Name => Query::Css(format!("[name={}]", css_string(v))),
            Strategy::Css => Query::Css(v.to_string()),
            Strategy::ClassName => Query::Css(format!(".{}", v.trim())),
            Strategy::TagName => Query::Css(v.trim().to_string()),
            Strategy::XPath => Query::XPath(v.to_string()),
            Strategy::LinkText => {
                Query::XPath(format!("//a[normalize-space(.)={}]", xpath_string(v.trim())))
            }
            Strategy::PartialLinkText => Query::XPath(format!(
                "//a[contains(normalize-space(.), {})]",
                xpath_string(v)
            )),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.strategy, self.value)
    }
}

/// Quote a value as a CSS string literal
fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Quote a value as an XPath 1.0 string literal.
///
/// XPath has no escape sequences; a value holding both quote kinds is
/// assembled with `concat()`.
fn xpath_string(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    let parts: Vec<String> = value
        .split('"')
        .map(|part| format!("\"{part}\""))
        .collect();
    format!("concat({})", parts.join(", '\"', "))
}
