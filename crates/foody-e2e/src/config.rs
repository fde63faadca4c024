//! Suite configuration.
//!
//! Loaded from YAML (or JSON, which is a YAML subset) with every field
//! optional, then adjusted with the `with_*` builders by the CLI.

use crate::driver::DriverConfig;
use crate::result::{FoodyError, FoodyResult};
use crate::wait::WaitPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Deployment the journey runs against when nothing else is configured
pub const DEFAULT_BASE_URL: &str =
    "http://softuni-qa-loadbalancer-2137572849.eu-north-1.elb.amazonaws.com:85/";

/// Password used for registration and login
pub const DEFAULT_PASSWORD: &str = "123456";

/// What the edit step expects the application to do with an edited item.
///
/// The deployed application creates a new card instead of updating the
/// existing one. `CreatesNew` asserts that observed behaviour, `InPlace`
/// asserts a correct update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditExpectation {
    /// Edit appends a new card and leaves the original untouched
    #[default]
    CreatesNew,
    /// Edit renames the card and the count is unchanged
    InPlace,
}

impl EditExpectation {
    /// Name as used in config files and on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatesNew => "creates-new",
            Self::InPlace => "in-place",
        }
    }
}

impl fmt::Display for EditExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account details submitted on the registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Registration {
    /// Fixed username prefix
    pub username_prefix: String,
    /// Number of random characters appended to the prefix
    pub username_suffix_len: usize,
    /// Domain of the generated email address
    pub email_domain: String,
    /// First name
    pub first_name: String,
    /// Middle name
    pub middle_name: String,
    /// Last name
    pub last_name: String,
    /// Password, also used to log back in
    pub password: String,
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            username_prefix: "alp".to_string(),
            username_suffix_len: 3,
            email_domain: "yahoo.com".to_string(),
            first_name: "Al".to_string(),
            middle_name: "Pl".to_string(),
            last_name: "Pe".to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

/// Everything a journey run needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Base URL of the deployment, always ending with `/`
    pub base_url: String,
    /// Lookup timeout and polling interval
    pub wait: WaitPolicy,
    /// Browser launch settings
    pub driver: DriverConfig,
    /// Registration form values
    pub registration: Registration,
    /// Expected edit behaviour
    pub edit_expectation: EditExpectation,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            wait: WaitPolicy::default(),
            driver: DriverConfig::default(),
            registration: Registration::default(),
            edit_expectation: EditExpectation::default(),
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

impl SuiteConfig {
    /// Default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(source: &str) -> FoodyResult<Self> {
        Self::parse_yaml(source)?.validated()
    }

    /// Parse a YAML document without validating it.
    ///
    /// For layering overrides on top of a file; call [`Self::validated`]
    /// once they are applied.
    pub fn parse_yaml(source: &str) -> FoodyResult<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Load and validate a YAML file
    pub fn load(path: impl AsRef<Path>) -> FoodyResult<Self> {
        Self::read(path)?.validated()
    }

    /// Read a YAML file without validating it
    pub fn read(path: impl AsRef<Path>) -> FoodyResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            FoodyError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::parse_yaml(&source)?;
        tracing::debug!(path = %path.display(), "read suite config");
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> FoodyResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(url.as_ref());
        self
    }

    /// Set the lookup timeout
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.wait = self.wait.with_timeout(timeout_ms);
        self
    }

    /// Run with or without a visible window
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.driver.headless = headless;
        self
    }

    /// Use a specific Chromium binary
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.driver.chromium_path = Some(path.into());
        self
    }

    /// Set the expected edit behaviour
    #[must_use]
    pub const fn with_edit_expectation(mut self, expectation: EditExpectation) -> Self {
        self.edit_expectation = expectation;
        self
    }

    /// Check the configuration and normalise the base URL
    pub fn validated(mut self) -> FoodyResult<Self> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(FoodyError::config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.wait.poll_interval_ms == 0 {
            return Err(FoodyError::config("wait.poll_interval_ms must be positive"));
        }
        if self.registration.password.is_empty() {
            return Err(FoodyError::config("registration.password must not be empty"));
        }
        self.base_url = normalize_base_url(&self.base_url);
        Ok(self)
    }
}
