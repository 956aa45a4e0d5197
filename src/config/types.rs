//! Core configuration types
//!
//! This module contains the `ExtractorConfig` struct shared by every
//! extraction call and the `CrawlOptions` bounds for a single crawl.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::format::ContentFormat;
use crate::utils::{
    CHROME_USER_AGENT, DEFAULT_CONTENT_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_MAX_CONCURRENT_PAGES, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAGES,
    DEFAULT_NAVIGATION_TIMEOUT_SECS, DEFAULT_TRANSCRIPT_SERVICE_URL,
};

/// Process-wide extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub(crate) headless: bool,

    /// Chrome user data directory for profile isolation.
    /// When unset, a per-process temp directory is used and removed on close.
    pub(crate) chrome_data_dir: Option<PathBuf>,

    /// Timeout in seconds for page navigation
    ///
    /// When it fires the navigation is abandoned and whatever the page has
    /// rendered so far is read.
    ///
    /// Default: 15 seconds
    pub(crate) navigation_timeout_secs: u64,

    /// Timeout in seconds for reading the rendered DOM
    ///
    /// Default: 10 seconds
    pub(crate) content_timeout_secs: u64,

    /// Timeout in seconds for plain HTTP fetches
    ///
    /// Default: 30 seconds
    pub(crate) http_timeout_secs: u64,

    pub(crate) user_agent: String,

    /// Base URL of the transcript service (`{base}/transcript/{video_id}`).
    /// `None` disables transcript lookup; videos still extract with a placeholder.
    pub(crate) transcript_service_url: Option<String>,

    /// Explicit tesseract binary. When unset the binary is looked up on `PATH`.
    pub(crate) tesseract_path: Option<PathBuf>,

    /// Formats the operator has switched off; reported as unavailable
    pub(crate) disabled_formats: Vec<ContentFormat>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_data_dir: None,
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            content_timeout_secs: DEFAULT_CONTENT_TIMEOUT_SECS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: CHROME_USER_AGENT.to_string(),
            transcript_service_url: Some(DEFAULT_TRANSCRIPT_SERVICE_URL.to_string()),
            tesseract_path: None,
            disabled_formats: Vec::new(),
        }
    }
}

/// Bounds for one `crawl()` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlOptions {
    /// Number of breadth-first levels to process; 0 processes nothing
    pub(crate) max_depth: usize,
    /// Upper bound on entries in the result mapping
    pub(crate) max_pages: usize,
    /// Host substrings a URL must contain to be extracted
    pub(crate) allowed_domains: Option<Vec<String>>,
    /// In-flight extractions per level; 1 keeps the crawl strictly sequential
    pub(crate) max_concurrent_pages: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_pages: DEFAULT_MAX_PAGES,
            allowed_domains: None,
            max_concurrent_pages: DEFAULT_MAX_CONCURRENT_PAGES,
        }
    }
}
