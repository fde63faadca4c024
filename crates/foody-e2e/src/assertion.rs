//! Assertions used by journey steps.
//!
//! Each check produces an [`AssertionResult`]; steps convert it with
//! [`AssertionResult::into_result`] so a failed check ends the step with
//! [`FoodyError::AssertionFailed`].

use crate::result::{FoodyError, FoodyResult};
use std::fmt::Debug;

/// Result of an assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
}

impl AssertionResult {
    /// Create a passing assertion result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    /// Create a failing assertion result
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }

    /// Prefix the failure message with what was being checked
    #[must_use]
    pub fn context(mut self, what: &str) -> Self {
        if !self.passed {
            self.message = format!("{what}: {}", self.message);
        }
        self
    }

    /// Turn a failure into [`FoodyError::AssertionFailed`]
    pub fn into_result(self) -> FoodyResult<()> {
        if self.passed {
            Ok(())
        } else {
            Err(FoodyError::assertion(self.message))
        }
    }
}

/// Assertion helpers
pub struct Assertion;

impl Assertion {
    /// Assert two values are equal
    #[must_use]
    pub fn equals<T: PartialEq + Debug + ?Sized>(expected: &T, actual: &T) -> AssertionResult {
        if expected == actual {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected {expected:?}, got {actual:?}"))
        }
    }

    /// Assert two values differ
    #[must_use]
    pub fn not_equals<T: PartialEq + Debug + ?Sized>(
        unexpected: &T,
        actual: &T,
    ) -> AssertionResult {
        if unexpected == actual {
            AssertionResult::fail(format!("expected anything but {unexpected:?}"))
        } else {
            AssertionResult::pass()
        }
    }

    /// Assert a string contains a substring
    #[must_use]
    pub fn contains(haystack: &str, needle: &str) -> AssertionResult {
        if haystack.contains(needle) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected '{haystack}' to contain '{needle}'"))
        }
    }

    /// Assert a condition is true
    #[must_use]
    pub fn is_true(condition: bool, message: &str) -> AssertionResult {
        if condition {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(message)
        }
    }

    /// Assert collection has expected length
    #[must_use]
    pub fn has_length<T>(collection: &[T], expected: usize) -> AssertionResult {
        let actual = collection.len();
        if actual == expected {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected length {expected}, got {actual}"))
        }
    }
}
