//! Headless browser session used for rendered page retrieval
//!
//! A session owns at most one launched browser. Each `fetch_rendered` call
//! opens a fresh tab, navigates, reads the DOM and closes the tab, so pages
//! never leak state into one another.

use chromiumoxide::browser::Browser;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::PageRenderer;
use super::page_timeout::with_page_timeout;
use crate::browser_setup::launch_browser;
use crate::config::ExtractorConfig;
use crate::error::{ExtractError, ExtractResult};

/// Wrapper for Browser and its event handler task
///
/// The handler MUST be aborted when the browser goes away, otherwise it keeps
/// polling a dead websocket forever.
pub struct BrowserWrapper {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserWrapper {
    pub(crate) fn new(
        browser: Browser,
        handler: JoinHandle<()>,
        user_data_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            browser,
            handler,
            user_data_dir,
        }
    }

    pub(crate) fn browser(&self) -> &Browser {
        &self.browser
    }

    pub(crate) fn browser_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }

    /// Remove the temp profile directory
    ///
    /// MUST be called AFTER `browser.wait()` so Chrome has released its file
    /// handles. Blocking, since it also runs from `Drop`.
    pub fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            debug!("Cleaning up temp directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up temp directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserWrapper {
    fn drop(&mut self) {
        self.handler.abort();
        // Browser::drop kills the Chrome process

        if self.user_data_dir.is_some() {
            warn!("BrowserWrapper dropped without explicit close - removing temp dir in Drop");
            self.cleanup_temp_dir();
        }
    }
}

/// Chromium-backed `PageRenderer`
///
/// Lifecycle: `new` (closed) → `open` → any number of `fetch_rendered` →
/// `close`. `close` is idempotent and a closed session can be reopened.
pub struct BrowserSession {
    config: Arc<ExtractorConfig>,
    wrapper: Option<BrowserWrapper>,
}

impl BrowserSession {
    #[must_use]
    pub fn new(config: Arc<ExtractorConfig>) -> Self {
        Self {
            config,
            wrapper: None,
        }
    }

    /// Navigate and read the DOM of an already created tab
    async fn render(&self, page: &Page, url: &str) -> ExtractResult<String> {
        let navigation = async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<_, CdpError>(())
        };

        // Slow or failing navigation is not fatal: read whatever has rendered
        match tokio::time::timeout(self.config.navigation_timeout(), navigation).await {
            Ok(Ok(())) => debug!("Navigation settled for {url}"),
            Ok(Err(e)) => warn!("Navigation error for {url}, reading partial DOM: {e}"),
            Err(_) => warn!("{}, reading partial DOM", self.navigation_timeout_error(url)),
        }

        let html = with_page_timeout(page.content(), self.config.content_timeout(), "Content read")
            .await?;
        Ok(html)
    }

    /// Non-fatal: logged, then the partial DOM is read
    fn navigation_timeout_error(&self, url: &str) -> ExtractError {
        ExtractError::NavigationTimeout {
            url: url.to_string(),
            timeout_secs: self.config.navigation_timeout_secs(),
        }
    }
}

impl PageRenderer for BrowserSession {
    async fn open(&mut self) -> ExtractResult<()> {
        if self.wrapper.is_some() {
            return Ok(());
        }
        let (browser, handler, user_data_dir) = launch_browser(&self.config).await?;
        self.wrapper = Some(BrowserWrapper::new(browser, handler, user_data_dir));
        info!("Browser session opened");
        Ok(())
    }

    async fn fetch_rendered(&self, url: &str) -> ExtractResult<String> {
        let wrapper = self.wrapper.as_ref().ok_or(ExtractError::NotInitialized)?;

        let page = with_page_timeout(
            wrapper.browser().new_page("about:blank"),
            self.config.content_timeout(),
            "Page creation",
        )
        .await?;

        let result = self.render(&page, url).await;

        if let Err(e) = page.close().await {
            debug!("Failed to close tab for {url}: {e}");
        }
        result
    }

    async fn close(&mut self) {
        let Some(mut wrapper) = self.wrapper.take() else {
            return;
        };

        if let Err(e) = wrapper.browser_mut().close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = wrapper.browser_mut().wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        wrapper.cleanup_temp_dir();
        info!("Browser session closed");
    }

    fn is_open(&self) -> bool {
        self.wrapper.is_some()
    }
}
