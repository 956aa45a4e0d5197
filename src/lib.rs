pub mod browser;
pub mod browser_setup;
pub mod capability;
pub mod config;
pub mod crawl_engine;
pub mod dispatcher;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod format;
pub mod schema;
pub mod utils;

use std::sync::Arc;

pub use browser::{BrowserSession, PageRenderer};
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use capability::CapabilityRegistry;
pub use config::{CrawlOptions, CrawlOptionsBuilder, ExtractorConfig, ExtractorConfigBuilder};
pub use crawl_engine::{CrawlResults, CrawlState, CrawlSummary, Crawler, should_visit_url};
pub use dispatcher::ExtractorDispatcher;
pub use error::{ExtractError, ExtractResult};
pub use fetch::{ContentFetcher, HttpFetcher};
pub use format::{ContentFormat, classify};
pub use schema::{ExtractionResult, FAILED_CONTENT, NO_CONTENT, Row};

/// Process-level entry point
///
/// Holds the configuration, the capability table (detected once, in `new`)
/// and a pooled HTTP client. Every `extract` or `crawl` call gets its own
/// browser session, so concurrent calls never share a browser.
#[derive(Debug, Clone)]
pub struct UrlExtractor {
    config: Arc<ExtractorConfig>,
    capabilities: Arc<CapabilityRegistry>,
    fetcher: HttpFetcher,
}

impl UrlExtractor {
    /// Detect capabilities and build the HTTP client
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Config` if the HTTP client cannot be built.
    pub fn new(config: ExtractorConfig) -> ExtractResult<Self> {
        let capabilities = CapabilityRegistry::detect(&config);
        Self::with_capabilities(config, capabilities)
    }

    /// Use a precomputed capability table instead of probing
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Config` if the HTTP client cannot be built.
    pub fn with_capabilities(
        config: ExtractorConfig,
        capabilities: CapabilityRegistry,
    ) -> ExtractResult<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            capabilities: Arc::new(capabilities),
            fetcher,
        })
    }

    /// Build from `URLEXTRACT_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = ExtractorConfig::from_env()?;
        Ok(Self::new(config)?)
    }

    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    #[must_use]
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Extract a single URL. Never fails; problems come back as a degraded result.
    ///
    /// A browser is launched only when the URL ends up on the webpage path.
    pub async fn extract(&self, url: &str) -> ExtractionResult {
        let mut dispatcher = self.dispatcher();
        let result = dispatcher.extract_lazily(url).await;
        dispatcher.close().await;
        result
    }

    /// Breadth-first crawl from `start_url`
    pub async fn crawl(&self, start_url: &str, options: &CrawlOptions) -> CrawlResults {
        self.crawl_with_summary(start_url, options).await.0
    }

    /// Crawl and report totals alongside the results
    pub async fn crawl_with_summary(
        &self,
        start_url: &str,
        options: &CrawlOptions,
    ) -> (CrawlResults, CrawlSummary) {
        let mut crawler = Crawler::new(self.dispatcher());
        crawler.crawl_with_summary(start_url, options).await
    }

    fn dispatcher(&self) -> ExtractorDispatcher<BrowserSession, HttpFetcher> {
        ExtractorDispatcher::new(
            Arc::clone(&self.config),
            Arc::clone(&self.capabilities),
            BrowserSession::new(Arc::clone(&self.config)),
            self.fetcher.clone(),
        )
    }
}
