//! WebDriver - the automation seam consumed by the finder.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  WebDriver (sync trait)                                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────────┐        ┌──────────────────────┐    │
//! │  │  ChromiumSession     │        │  MockDriver          │    │
//! │  │  (`browser` feature) │        │  (unit tests)        │    │
//! │  │  CDP (chromiumoxide) │        │  in-memory stub DOM  │    │
//! │  └──────────────────────┘        └──────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call blocks until the browser has finished the action. Element
//! handles are only valid until the page navigates or reloads.

use crate::locator::Query;
use crate::result::FoodyResult;
use serde::{Deserialize, Serialize};

/// Browser automation session used by the finder and page helpers
pub trait WebDriver {
    /// Driver-specific element handle
    type Element;

    /// Navigate to an absolute URL
    fn goto(&self, url: &str) -> FoodyResult<()>;

    /// URL of the current document
    fn current_url(&self) -> FoodyResult<String>;

    /// All elements matching `query` in document order (may be empty)
    fn find_elements(&self, query: &Query) -> FoodyResult<Vec<Self::Element>>;

    /// All descendants of `parent` matching `query` in document order
    fn find_elements_in(
        &self,
        parent: &Self::Element,
        query: &Query,
    ) -> FoodyResult<Vec<Self::Element>>;

    /// Whether the element is rendered and visible
    fn is_displayed(&self, element: &Self::Element) -> FoodyResult<bool>;

    /// Rendered text of the element
    fn text(&self, element: &Self::Element) -> FoodyResult<String>;

    /// Click the element
    fn click(&self, element: &Self::Element) -> FoodyResult<()>;

    /// Move the pointer onto the element, then click it
    fn move_to_and_click(&self, element: &Self::Element) -> FoodyResult<()>;

    /// Clear an input's value
    fn clear(&self, element: &Self::Element) -> FoodyResult<()>;

    /// Type text into the element
    fn send_keys(&self, element: &Self::Element, text: &str) -> FoodyResult<()>;
}

/// Browser launch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Window width
    pub window_width: u32,
    /// Window height
    pub window_height: u32,
    /// Start with a maximized window
    pub maximized: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Suppress the password manager bubble after login/registration
    pub disable_password_manager: bool,
    /// Extra command-line switches
    pub args: Vec<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            maximized: true,
            chromium_path: None,
            sandbox: true,
            disable_password_manager: true,
            args: vec!["--disable-search-engine-choice-screen".to_string()],
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set window dimensions
    #[must_use]
    pub const fn with_window(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Append an extra command-line switch
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// All switches passed to the browser, in launch order
    #[must_use]
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = self.args.clone();
        if self.maximized {
            args.push("--start-maximized".to_string());
        }
        if self.disable_password_manager {
            args.push("--password-store=basic".to_string());
            args.push(
                "--disable-features=PasswordLeakDetection,PasswordManagerOnboarding".to_string(),
            );
        }
        args
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DriverConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert_eq!(config.window_width, 1920);
        assert!(config
            .args
            .contains(&"--disable-search-engine-choice-screen".to_string()));
    }

    #[test]
    fn test_builder() {
        let config = DriverConfig::new()
            .with_headless(false)
            .with_window(1280, 720)
            .with_chromium_path("/usr/bin/chromium")
            .with_no_sandbox()
            .with_arg("--lang=en");
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!((config.window_width, config.window_height), (1280, 720));
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
        assert_eq!(config.args.last().map(String::as_str), Some("--lang=en"));
    }

    #[test]
    fn test_launch_args() {
        let args = DriverConfig::default().launch_args();
        assert!(args.contains(&"--start-maximized".to_string()));
        assert!(args.contains(&"--password-store=basic".to_string()));

        let mut plain = DriverConfig::default();
        plain.maximized = false;
        plain.disable_password_manager = false;
        assert_eq!(plain.launch_args(), plain.args);
    }
}
