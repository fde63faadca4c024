//! Chromium backend over the Chrome DevTools Protocol.
//!
//! chromiumoxide is async; [`ChromiumSession`] owns a private tokio runtime
//! and blocks on every call so the rest of the crate sees a synchronous
//! [`WebDriver`].

use crate::driver::{DriverConfig, WebDriver};
use crate::locator::Query;
use crate::result::{FoodyError, FoodyResult};
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

/// How long a click may take to start replacing the document
const NAVIGATION_START: Duration = Duration::from_secs(5);

/// Upper bound on waiting for the new document to finish loading
const NAVIGATION_SETTLE: Duration = Duration::from_secs(10);

const NAVIGATION_POLL: Duration = Duration::from_millis(50);

/// CDP answer to an XPath search with no results
const EMPTY_SEARCH_MESSAGE: &str = "Invalid search result range";

const MARK_DOCUMENT_JS: &str = "(window.__foodyE2eDocument = true)";
const SAME_DOCUMENT_JS: &str = "window.__foodyE2eDocument === true";
const DOCUMENT_READY_JS: &str = "document.readyState === 'complete'";

const IS_DISPLAYED_JS: &str = "function() {
    const rect = this.getBoundingClientRect();
    const style = window.getComputedStyle(this);
    return rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden' && style.display !== 'none';
}";

const CLEAR_JS: &str = "function() {
    this.value = '';
    this.dispatchEvent(new Event('input', { bubbles: true }));
    this.dispatchEvent(new Event('change', { bubbles: true }));
}";

fn driver_err(e: impl fmt::Display) -> FoodyError {
    FoodyError::driver(e.to_string())
}

/// Map a CDP query outcome onto the driver contract.
///
/// `DOM.querySelectorAll` answers "no match" with an empty list, but an
/// XPath search with no results fails when its (empty) result range is
/// fetched. That one error is an empty result; anything else is a driver
/// error the finder keeps polling through.
fn query_outcome<T, E: fmt::Display>(found: Result<Vec<T>, E>, query: &Query) -> FoodyResult<Vec<T>> {
    match found {
        Ok(elements) => Ok(elements),
        Err(e) => {
            let message = e.to_string();
            if matches!(query, Query::XPath(_)) && message.contains(EMPTY_SEARCH_MESSAGE) {
                Ok(Vec::new())
            } else {
                Err(FoodyError::driver(format!(
                    "query '{}' failed: {message}",
                    query.as_str()
                )))
            }
        }
    }
}

/// One Chromium process with a single tab
pub struct ChromiumSession {
    runtime: Runtime,
    browser: CdpBrowser,
    page: CdpPage,
    handler: JoinHandle<()>,
}

impl fmt::Debug for ChromiumSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChromiumSession").finish_non_exhaustive()
    }
}

impl ChromiumSession {
    /// Launch Chromium and open a blank tab
    ///
    /// # Errors
    ///
    /// Returns [`FoodyError::BrowserLaunch`] if the runtime, the browser or
    /// the first tab cannot be created.
    pub fn launch(config: &DriverConfig) -> FoodyResult<Self> {
        let launch_err = |e: &dyn fmt::Display| FoodyError::BrowserLaunch {
            message: e.to_string(),
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| launch_err(&e))?;

        let mut builder = CdpConfig::builder()
            .window_size(config.window_width, config.window_height)
            .viewport(None);
        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }
        for arg in config.launch_args() {
            builder = builder.arg(arg);
        }
        let cdp_config = builder.build().map_err(|e| launch_err(&e))?;

        tracing::info!(headless = config.headless, "launching chromium");
        let (browser, page, handler) = runtime.block_on(async {
            let (browser, mut handler) = CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| launch_err(&e))?;

            let handler = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| launch_err(&e))?;
            Ok::<_, FoodyError>((browser, page, handler))
        })?;

        Ok(Self {
            runtime,
            browser,
            page,
            handler,
        })
    }

    /// Close the browser and stop the event handler
    pub fn close(mut self) -> FoodyResult<()> {
        tracing::info!("closing chromium");
        let browser = &mut self.browser;
        let result = self.runtime.block_on(async {
            browser.close().await.map_err(driver_err)?;
            browser.wait().await.map_err(driver_err)?;
            Ok(())
        });
        self.handler.abort();
        result
    }

    fn eval_bool(&self, expression: &str) -> FoodyResult<bool> {
        let result = self
            .runtime
            .block_on(self.page.evaluate_expression(EvaluateParams::new(expression)))
            .map_err(driver_err)?;
        result.into_value::<bool>().map_err(driver_err)
    }

    /// Tag the current document so a replacement can be told apart from it
    fn mark_document(&self) {
        if let Err(e) = self.eval_bool(MARK_DOCUMENT_JS) {
            tracing::debug!(error = %e, "could not mark document");
        }
    }

    /// After a click, wait for the marked document to be replaced and the
    /// new one to finish loading.
    ///
    /// A form post keeps the old document until the server answers, so
    /// waiting on the frame alone can return before navigation has begun.
    /// Clicks that never navigate cost [`NAVIGATION_START`].
    fn settle_navigation(&self) {
        if !await_replacement(|| self.eval_bool(SAME_DOCUMENT_JS), NAVIGATION_START) {
            tracing::debug!("click did not navigate");
            return;
        }
        if !poll_until(|| self.eval_bool(DOCUMENT_READY_JS), NAVIGATION_SETTLE) {
            tracing::debug!("navigation did not settle");
        }
    }
}

/// Poll `check` until it answers `Ok(true)`; false once `limit` has passed
fn poll_until(mut check: impl FnMut() -> FoodyResult<bool>, limit: Duration) -> bool {
    let start = Instant::now();
    loop {
        if matches!(check(), Ok(true)) {
            return true;
        }
        if start.elapsed() >= limit {
            return false;
        }
        std::thread::sleep(NAVIGATION_POLL);
    }
}

/// Wait for the marked document to go away. An evaluation error counts as
/// gone: the old context is torn down mid-navigation.
fn await_replacement(mut same_document: impl FnMut() -> FoodyResult<bool>, limit: Duration) -> bool {
    poll_until(|| Ok(!matches!(same_document(), Ok(true))), limit)
}

impl WebDriver for ChromiumSession {
    type Element = Element;

    fn goto(&self, url: &str) -> FoodyResult<()> {
        self.runtime
            .block_on(self.page.goto(url))
            .map(|_| ())
            .map_err(|e| FoodyError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    fn current_url(&self) -> FoodyResult<String> {
        let url = self.runtime.block_on(self.page.url()).map_err(driver_err)?;
        Ok(url.unwrap_or_default())
    }

    fn find_elements(&self, query: &Query) -> FoodyResult<Vec<Element>> {
        let found = match query {
            Query::Css(css) => self.runtime.block_on(self.page.find_elements(css.as_str())),
            Query::XPath(xpath) => self.runtime.block_on(self.page.find_xpaths(xpath.as_str())),
        };
        query_outcome(found, query)
    }

    fn find_elements_in(&self, parent: &Element, query: &Query) -> FoodyResult<Vec<Element>> {
        match query {
            Query::Css(css) => {
                query_outcome(self.runtime.block_on(parent.find_elements(css.as_str())), query)
            }
            Query::XPath(_) => Err(FoodyError::UnsupportedLocator {
                message: "xpath lookups scoped to an element are not supported by the chromium backend"
                    .to_string(),
            }),
        }
    }

    fn is_displayed(&self, element: &Element) -> FoodyResult<bool> {
        let returns = self
            .runtime
            .block_on(element.call_js_fn(IS_DISPLAYED_JS, false))
            .map_err(driver_err)?;
        Ok(returns
            .result
            .value
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    fn text(&self, element: &Element) -> FoodyResult<String> {
        let text = self
            .runtime
            .block_on(element.inner_text())
            .map_err(driver_err)?;
        Ok(text.map(|t| t.trim().to_string()).unwrap_or_default())
    }

    fn click(&self, element: &Element) -> FoodyResult<()> {
        self.mark_document();
        self.runtime
            .block_on(element.click())
            .map_err(driver_err)?;
        self.settle_navigation();
        Ok(())
    }

    fn move_to_and_click(&self, element: &Element) -> FoodyResult<()> {
        self.mark_document();
        self.runtime
            .block_on(async {
                element.scroll_into_view().await?;
                element.hover().await?;
                element.click().await
            })
            .map_err(driver_err)?;
        self.settle_navigation();
        Ok(())
    }

    fn clear(&self, element: &Element) -> FoodyResult<()> {
        self.runtime
            .block_on(element.call_js_fn(CLEAR_JS, false))
            .map(|_| ())
            .map_err(driver_err)
    }

    fn send_keys(&self, element: &Element, text: &str) -> FoodyResult<()> {
        self.runtime
            .block_on(async {
                element.focus().await?;
                element.type_str(text).await
            })
            .map(|_| ())
            .map_err(driver_err)
    }
}
