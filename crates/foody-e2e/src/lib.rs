//! Foody E2E: page objects and an ordered browser journey for the Foody
//! food-review web application.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    FOODY E2E Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Workflow   │    │ FoodyPage  │    │ Finder     │            │
//! │   │ (journey   │───►│ (page      │───►│ (locator + │───► WebDriver
//! │   │  steps)    │    │  helpers)  │    │  wait)     │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! │         │                                                        │
//! │         └──► FixtureState (values handed between steps)          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The real backend is [`ChromiumSession`] (cargo feature `browser`); unit
//! tests run against [`mock::MockDriver`].

#![warn(missing_docs)]

mod assertion;
#[cfg(feature = "browser")]
mod browser;
mod config;
mod driver;
mod finder;
mod fixture;
mod locator;
mod page;
mod result;
mod wait;

/// Stub DOM driver for tests
pub mod mock;

/// The Foody journey and its step context
pub mod journey;

/// Ordered workflows of named steps
pub mod scenario;

/// Paths and selectors of the Foody markup
#[allow(missing_docs)]
pub mod selectors;

pub use assertion::{Assertion, AssertionResult};
#[cfg(feature = "browser")]
pub use browser::ChromiumSession;
pub use config::{
    EditExpectation, Registration, SuiteConfig, DEFAULT_BASE_URL, DEFAULT_PASSWORD,
};
pub use driver::{DriverConfig, WebDriver};
pub use finder::Finder;
pub use fixture::{generate_random_string, FixtureState, RANDOM_CHARSET};
pub use journey::{foody_journey, JourneyContext};
pub use locator::{Locator, Query, Strategy};
pub use page::{CardAction, FoodyPage};
pub use result::{FoodyError, FoodyResult};
pub use scenario::{StepResult, Workflow, WorkflowResults};
pub use wait::{WaitPolicy, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

/// Run the Foody journey against an already launched driver
pub fn run_journey<D: WebDriver>(driver: &D, config: &SuiteConfig) -> WorkflowResults {
    let mut ctx = JourneyContext::new(driver, config);
    foody_journey().run(&mut ctx)
}
