//! Result and error types for the Foody suite.

use thiserror::Error;

/// Result type for suite operations
pub type FoodyResult<T> = Result<T, FoodyError>;

/// Errors that can occur while driving the Foody application
#[derive(Debug, Error)]
pub enum FoodyError {
    /// No qualifying element appeared within the wait window
    #[error("Timed out after {timeout_ms}ms waiting for {locator}")]
    LookupTimeout {
        /// Locator that never matched
        locator: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// An operation required a non-empty element collection
    #[error("Expected at least one {what}, found none")]
    EmptyResultPrecondition {
        /// Description of the missing elements
        what: String,
    },

    /// Expected vs. actual mismatch
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// A fixture slot was read before an earlier step wrote it
    #[error("Fixture slot '{slot}' has not been populated by an earlier step")]
    MissingFixture {
        /// Slot name
        slot: &'static str,
    },

    /// A component was used before setup created it
    #[error("{what} used before initialization")]
    NotInitialized {
        /// What was not initialized
        what: &'static str,
    },

    /// Element handle outlived the page it was found on
    #[error("Stale element reference: {locator}")]
    StaleElement {
        /// Description of the stale element
        locator: String,
    },

    /// Locator cannot be evaluated in this context
    #[error("Unsupported locator: {message}")]
    UnsupportedLocator {
        /// Error message
        message: String,
    },

    /// Driver-level failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FoodyError {
    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether a lookup may succeed if retried later on the same page
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::StaleElement { .. } | Self::Driver { .. })
    }
}
