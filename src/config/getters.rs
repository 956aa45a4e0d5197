//! Getter methods for `ExtractorConfig` and `CrawlOptions`

use std::path::PathBuf;
use std::time::Duration;

use super::types::{CrawlOptions, ExtractorConfig};
use crate::format::ContentFormat;

impl ExtractorConfig {
    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }

    #[must_use]
    pub fn navigation_timeout_secs(&self) -> u64 {
        self.navigation_timeout_secs
    }

    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    #[must_use]
    pub fn content_timeout_secs(&self) -> u64 {
        self.content_timeout_secs
    }

    #[must_use]
    pub fn content_timeout(&self) -> Duration {
        Duration::from_secs(self.content_timeout_secs)
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn transcript_service_url(&self) -> Option<&str> {
        self.transcript_service_url.as_deref()
    }

    #[must_use]
    pub fn tesseract_path(&self) -> Option<&PathBuf> {
        self.tesseract_path.as_ref()
    }

    #[must_use]
    pub fn disabled_formats(&self) -> &[ContentFormat] {
        &self.disabled_formats
    }

    #[must_use]
    pub fn is_disabled(&self, format: ContentFormat) -> bool {
        self.disabled_formats.contains(&format)
    }
}

impl CrawlOptions {
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[must_use]
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    #[must_use]
    pub fn allowed_domains(&self) -> Option<&[String]> {
        self.allowed_domains.as_deref()
    }

    #[must_use]
    pub fn max_concurrent_pages(&self) -> usize {
        self.max_concurrent_pages
    }
}
