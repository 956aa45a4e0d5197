//! Fluent builders for `ExtractorConfig` and `CrawlOptions`
//!
//! Both builders start from the documented defaults and validate on `build()`
//! so an invalid configuration never reaches the dispatcher or the crawler.

use anyhow::{Result, anyhow};
use std::path::PathBuf;
use url::Url;

use super::types::{CrawlOptions, ExtractorConfig};
use crate::format::ContentFormat;
use crate::utils::MAX_CONCURRENT_PAGES_LIMIT;

#[derive(Debug, Clone, Default)]
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfig {
    /// Create a builder for configuring an `ExtractorConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::default()
    }
}

impl ExtractorConfigBuilder {
    /// Start from an existing configuration
    #[must_use]
    pub fn from_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.chrome_data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.config.navigation_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn content_timeout_secs(mut self, secs: u64) -> Self {
        self.config.content_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn http_timeout_secs(mut self, secs: u64) -> Self {
        self.config.http_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set or clear the transcript service base URL
    #[must_use]
    pub fn transcript_service_url(mut self, url: Option<String>) -> Self {
        self.config.transcript_service_url = url;
        self
    }

    #[must_use]
    pub fn tesseract_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tesseract_path = Some(path.into());
        self
    }

    /// Switch a specialized format off regardless of what is installed
    #[must_use]
    pub fn disable_format(mut self, format: ContentFormat) -> Self {
        if !self.config.disabled_formats.contains(&format) {
            self.config.disabled_formats.push(format);
        }
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is zero, the user agent is empty, the
    /// transcript URL does not parse, or the webpage format is disabled.
    pub fn build(self) -> Result<ExtractorConfig> {
        let config = self.config;

        if config.navigation_timeout_secs == 0 {
            return Err(anyhow!("navigation_timeout_secs must be greater than 0"));
        }
        if config.content_timeout_secs == 0 {
            return Err(anyhow!("content_timeout_secs must be greater than 0"));
        }
        if config.http_timeout_secs == 0 {
            return Err(anyhow!("http_timeout_secs must be greater than 0"));
        }
        if config.user_agent.trim().is_empty() {
            return Err(anyhow!("user_agent must not be empty"));
        }
        if let Some(url) = &config.transcript_service_url {
            Url::parse(url).map_err(|e| anyhow!("Invalid transcript service URL '{url}': {e}"))?;
        }
        if config.disabled_formats.contains(&ContentFormat::Webpage) {
            return Err(anyhow!(
                "the webpage format is the universal fallback and cannot be disabled"
            ));
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CrawlOptionsBuilder {
    options: CrawlOptions,
}

impl CrawlOptions {
    /// Create a builder starting from the default crawl bounds
    #[must_use]
    pub fn builder() -> CrawlOptionsBuilder {
        CrawlOptionsBuilder::default()
    }
}

impl CrawlOptionsBuilder {
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = depth;
        self
    }

    #[must_use]
    pub fn max_pages(mut self, pages: usize) -> Self {
        self.options.max_pages = pages;
        self
    }

    /// Restrict extraction to hosts containing one of these substrings
    ///
    /// Blank entries are dropped. A list that ends up empty still counts as
    /// given and admits no URL at all.
    #[must_use]
    pub fn allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domains: Vec<String> = domains
            .into_iter()
            .map(Into::into)
            .map(|d: String| d.trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        self.options.allowed_domains = Some(domains);
        self
    }

    #[must_use]
    pub fn max_concurrent_pages(mut self, concurrency: usize) -> Self {
        self.options.max_concurrent_pages = concurrency;
        self
    }

    /// Build the crawl options
    ///
    /// # Errors
    ///
    /// Returns an error if concurrency is outside `1..=16`.
    pub fn build(self) -> Result<CrawlOptions> {
        let options = self.options;
        if options.max_concurrent_pages == 0
            || options.max_concurrent_pages > MAX_CONCURRENT_PAGES_LIMIT
        {
            return Err(anyhow!(
                "max_concurrent_pages must be between 1 and {MAX_CONCURRENT_PAGES_LIMIT}, got {}",
                options.max_concurrent_pages
            ));
        }
        Ok(options)
    }
}
