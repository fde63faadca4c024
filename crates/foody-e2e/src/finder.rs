//! Locator/wait facade.
//!
//! A [`Finder`] pairs a driver with the session's [`WaitPolicy`]. Each call
//! is one bounded poll loop: no caching, no backoff, no per-call timeout.
//! The only way to get a `Finder` is [`Finder::new`], so a lookup can never
//! run against an uninitialized driver.

use crate::driver::WebDriver;
use crate::locator::Locator;
use crate::result::FoodyResult;
use crate::wait::WaitPolicy;
use std::fmt;

/// Blocking, timeout-bounded element lookup
pub struct Finder<'d, D: WebDriver> {
    driver: &'d D,
    wait: WaitPolicy,
}

impl<D: WebDriver> Clone for Finder<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: WebDriver> Copy for Finder<'_, D> {}

impl<D: WebDriver> fmt::Debug for Finder<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finder")
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

macro_rules! strategy_accessors {
    ($($one:ident, $all:ident => $ctor:ident;)*) => {
        $(
            #[doc = concat!("First visible element by `", stringify!($ctor), "`")]
            pub fn $one(&self, value: &str) -> FoodyResult<D::Element> {
                self.find_one(&Locator::$ctor(value))
            }

            #[doc = concat!("All elements by `", stringify!($ctor), "`")]
            pub fn $all(&self, value: &str) -> FoodyResult<Vec<D::Element>> {
                self.find_all(&Locator::$ctor(value))
            }
        )*
    };
}

impl<'d, D: WebDriver> Finder<'d, D> {
    /// Create a finder over `driver` applying `wait` to every lookup
    #[must_use]
    pub const fn new(driver: &'d D, wait: WaitPolicy) -> Self {
        Self { driver, wait }
    }

    /// The underlying driver
    #[must_use]
    pub const fn driver(&self) -> &'d D {
        self.driver
    }

    /// The wait policy applied to every lookup
    #[must_use]
    pub const fn wait_policy(&self) -> WaitPolicy {
        self.wait
    }

    /// Wait until the first match for `locator` is present and displayed.
    ///
    /// # Errors
    ///
    /// [`crate::FoodyError::LookupTimeout`] if that never happens within the
    /// wait policy's timeout.
    pub fn find_one(&self, locator: &Locator) -> FoodyResult<D::Element> {
        tracing::debug!(%locator, "find one");
        let query = locator.to_query();
        self.wait.until(&locator.to_string(), || {
            let Some(first) = self.driver.find_elements(&query)?.into_iter().next() else {
                return Ok(None);
            };
            Ok(self.driver.is_displayed(&first)?.then_some(first))
        })
    }

    /// Wait until the query for `locator` evaluates without raising and
    /// return every match. The result is a snapshot and may be empty.
    ///
    /// # Errors
    ///
    /// [`crate::FoodyError::LookupTimeout`] if the query keeps failing until
    /// the deadline.
    pub fn find_all(&self, locator: &Locator) -> FoodyResult<Vec<D::Element>> {
        tracing::debug!(%locator, "find all");
        let query = locator.to_query();
        self.wait
            .until(&locator.to_string(), || self.driver.find_elements(&query).map(Some))
    }

    /// [`Finder::find_one`] scoped to descendants of `parent`
    pub fn find_one_in(&self, parent: &D::Element, locator: &Locator) -> FoodyResult<D::Element> {
        tracing::debug!(%locator, "find one in element");
        let query = locator.to_query();
        self.wait.until(&locator.to_string(), || {
            let Some(first) = self
                .driver
                .find_elements_in(parent, &query)?
                .into_iter()
                .next()
            else {
                return Ok(None);
            };
            Ok(self.driver.is_displayed(&first)?.then_some(first))
        })
    }

    /// [`Finder::find_all`] scoped to descendants of `parent`
    pub fn find_all_in(
        &self,
        parent: &D::Element,
        locator: &Locator,
    ) -> FoodyResult<Vec<D::Element>> {
        tracing::debug!(%locator, "find all in element");
        let query = locator.to_query();
        self.wait.until(&locator.to_string(), || {
            self.driver.find_elements_in(parent, &query).map(Some)
        })
    }

    strategy_accessors! {
        id, all_id => id;
        name, all_name => name;
        css, all_css => css;
        xpath, all_xpath => xpath;
        class_name, all_class_name => class_name;
        tag_name, all_tag_name => tag_name;
        link_text, all_link_text => link_text;
        partial_link_text, all_partial_link_text => partial_link_text;
    }
}
