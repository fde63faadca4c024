//! Wait policy and the bounded poll loop behind every element lookup.
//!
//! One policy is configured per session and applied uniformly; there is no
//! per-call override.

use crate::result::{FoodyError, FoodyResult};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default timeout for element lookups (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Timeout and polling interval applied to every lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitPolicy {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitPolicy {
    /// Create a policy with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Poll `check` until it yields a value or the timeout elapses.
    ///
    /// `Ok(None)` and transient errors (see [`FoodyError::is_transient`])
    /// mean "not yet"; any other error ends the wait immediately. The check
    /// runs at least once even with a zero timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FoodyError::LookupTimeout`] naming `what` when the deadline
    /// passes, or the first non-transient error from the check.
    pub fn until<T, F>(&self, what: &str, mut check: F) -> FoodyResult<T>
    where
        F: FnMut() -> FoodyResult<Option<T>>,
    {
        let start = Instant::now();
        let timeout = self.timeout();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            match check() {
                Ok(Some(value)) => {
                    tracing::trace!(what, attempts, elapsed = ?start.elapsed(), "wait satisfied");
                    return Ok(value);
                }
                Ok(None) => {}
                Err(e) if e.is_transient() => {
                    tracing::trace!(what, error = %e, "transient error while waiting");
                }
                Err(e) => return Err(e),
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                tracing::debug!(what, attempts, timeout_ms = self.timeout_ms, "wait timed out");
                return Err(FoodyError::LookupTimeout {
                    locator: what.to_string(),
                    timeout_ms: self.timeout_ms,
                });
            }
            std::thread::sleep(self.poll_interval().min(timeout - elapsed));
        }
    }
}
