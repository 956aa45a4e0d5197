//! URL dispatch with two-tier fallback
//!
//! `extract` classifies a URL, checks the capability table and runs the
//! matching extractor. Unavailable formats go straight to the webpage
//! extractor; video and document failures retry once as a webpage; any
//! failure left over becomes a degraded result. `extract` itself never fails.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use crate::browser::PageRenderer;
use crate::capability::CapabilityRegistry;
use crate::config::ExtractorConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::extractors::{document, image, tabular, video, webpage};
use crate::fetch::ContentFetcher;
use crate::format::{ContentFormat, classify};
use crate::schema::ExtractionResult;
use crate::utils::is_valid_url;

/// Routes URLs to extractors over a shared renderer and fetcher
pub struct ExtractorDispatcher<R, F> {
    config: Arc<ExtractorConfig>,
    capabilities: Arc<CapabilityRegistry>,
    renderer: R,
    fetcher: F,
}

impl<R: PageRenderer, F: ContentFetcher> ExtractorDispatcher<R, F> {
    pub fn new(
        config: Arc<ExtractorConfig>,
        capabilities: Arc<CapabilityRegistry>,
        renderer: R,
        fetcher: F,
    ) -> Self {
        Self {
            config,
            capabilities,
            renderer,
            fetcher,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    #[must_use]
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Open the underlying renderer
    ///
    /// # Errors
    ///
    /// Returns the renderer's error when the browser cannot be launched.
    pub async fn open(&mut self) -> ExtractResult<()> {
        self.renderer.open().await
    }

    /// Close the underlying renderer. Idempotent.
    pub async fn close(&mut self) {
        self.renderer.close().await;
    }

    /// Extract one URL. Always returns a well-formed result.
    ///
    /// The renderer must already be open for the webpage path to succeed.
    pub async fn extract(&self, url: &str) -> ExtractionResult {
        let outcome = match self.try_specialized(url).await {
            Ok(Some(result)) => Ok(result),
            Ok(None) => self.extract_webpage(url).await,
            Err(e) => Err(e),
        };
        finish(url, outcome)
    }

    /// Extract one URL, opening the renderer only if the webpage path is taken
    ///
    /// Fetch-only formats never launch a browser. A failed launch is logged and
    /// the webpage attempt then degrades.
    pub async fn extract_lazily(&mut self, url: &str) -> ExtractionResult {
        let outcome = match self.try_specialized(url).await {
            Ok(Some(result)) => Ok(result),
            Ok(None) => {
                if !self.renderer.is_open()
                    && let Err(e) = self.renderer.open().await
                {
                    log::warn!(
                        target: "urlextract::dispatch",
                        "Browser session failed to open, rendered extraction will degrade: {e}"
                    );
                }
                self.extract_webpage(url).await
            }
            Err(e) => Err(e),
        };
        finish(url, outcome)
    }

    /// Run the specialized path for `url`
    ///
    /// `Ok(None)` means the URL should be rendered as a webpage: the format is
    /// webpage, its capability is unavailable, or a video/document extraction
    /// failed and gets one webpage retry.
    async fn try_specialized(&self, url: &str) -> ExtractResult<Option<ExtractionResult>> {
        if !is_valid_url(url) {
            return Err(ExtractError::InvalidUrl(url.to_string()));
        }

        let format = classify(url);
        if format.is_specialized() && !self.capabilities.is_available(format) {
            log::debug!(
                target: "urlextract::dispatch",
                "{format} capability unavailable, extracting {url} as webpage"
            );
            return Ok(None);
        }

        log::debug!(target: "urlextract::dispatch", "Extracting {url} as {format}");
        match format {
            ContentFormat::Video => {
                let primary = video::extract(&self.fetcher, &self.config, url);
                Ok(or_webpage(format, url, primary).await)
            }
            ContentFormat::Document => {
                let primary = document::extract(&self.fetcher, url);
                Ok(or_webpage(format, url, primary).await)
            }
            ContentFormat::Tabular => tabular::extract(&self.fetcher, url).await.map(Some),
            ContentFormat::Image => image::extract(&self.fetcher, self.ocr_binary(), url)
                .await
                .map(Some),
            ContentFormat::Webpage => Ok(None),
        }
    }

    async fn extract_webpage(&self, url: &str) -> ExtractResult<ExtractionResult> {
        webpage::extract(&self.renderer, url).await
    }

    fn ocr_binary(&self) -> Option<&Path> {
        self.capabilities.ocr_binary()
    }
}

/// Await a specialized extraction; a failure asks for a webpage retry
async fn or_webpage(
    format: ContentFormat,
    url: &str,
    primary: impl Future<Output = ExtractResult<ExtractionResult>>,
) -> Option<ExtractionResult> {
    match primary.await {
        Ok(result) => Some(result),
        Err(e) => {
            log::warn!(
                target: "urlextract::dispatch",
                "{format} extraction failed for {url}, falling back to webpage: {e}"
            );
            None
        }
    }
}

/// Fold any remaining error into a degraded result
fn finish(url: &str, outcome: ExtractResult<ExtractionResult>) -> ExtractionResult {
    outcome.unwrap_or_else(|e| {
        if e.is_transient() {
            log::warn!(target: "urlextract::dispatch", "Extraction failed for {url}: {e}");
        } else {
            log::info!(target: "urlextract::dispatch", "Extraction failed for {url}: {e}");
        }
        ExtractionResult::degraded(url, &e)
    })
}
