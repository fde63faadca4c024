//! Launches the browser and runs the journey

use crate::error::CliResult;
use foody_e2e::{SuiteConfig, WorkflowResults};

/// Run the Foody journey in a fresh Chromium session
#[cfg(feature = "browser")]
pub fn run_in_browser(config: &SuiteConfig) -> CliResult<WorkflowResults> {
    use foody_e2e::ChromiumSession;

    tracing::info!(base_url = %config.base_url, headless = config.driver.headless, "launching chromium");
    let session = ChromiumSession::launch(&config.driver)?;
    let results = foody_e2e::run_journey(&session, config);
    if let Err(e) = session.close() {
        tracing::warn!(error = %e, "chromium did not shut down cleanly");
    }
    Ok(results)
}

/// Run the Foody journey in a fresh Chromium session
#[cfg(not(feature = "browser"))]
pub fn run_in_browser(_config: &SuiteConfig) -> CliResult<WorkflowResults> {
    Err(crate::error::CliError::config(
        "built without browser support; rebuild with --features browser",
    ))
}
