//! Error types for extraction operations
//!
//! Every variant here is caught at the dispatcher boundary and folded into a
//! degraded `ExtractionResult`. Callers of `extract()` and `crawl()` never see
//! these directly; they exist so each extractor can return an explicit
//! `Result` instead of panicking or swallowing failures.

use thiserror::Error;

use crate::format::ContentFormat;

/// Result type alias for extractor operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Error taxonomy for the extraction pipeline
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Specialized dependency missing at startup
    #[error("{0} extraction is not available in this deployment")]
    CapabilityUnavailable(ContentFormat),

    /// Navigation did not settle before the deadline
    #[error("Navigation timeout after {timeout_secs}s for {url}")]
    NavigationTimeout { url: String, timeout_secs: u64 },

    /// Network or transport failure
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// Server answered with a non-success status
    #[error("HTTP error! status: {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Malformed document, tabular or image input
    #[error("{format} parsing error: {message}")]
    Parse {
        format: ContentFormat,
        message: String,
    },

    /// Browser automation failure
    #[error("Browser error: {0}")]
    Browser(String),

    /// `fetch_rendered` called before `open()` or after `close()`
    #[error("Browser not initialized")]
    NotInitialized,

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<anyhow::Error> for ExtractError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the context chain
        Self::Browser(format!("{err:#}"))
    }
}

impl ExtractError {
    /// Build a parse error for the given format
    pub fn parse(format: ContentFormat, message: impl Into<String>) -> Self {
        Self::Parse {
            format,
            message: message.into(),
        }
    }

    /// Build a fetch error for the given URL
    pub fn fetch(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Whether a retry at a later time could plausibly succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::NavigationTimeout { .. } | Self::Fetch { .. } | Self::Browser(_) => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Stable short name recorded as `metadata.error_kind` in degraded results
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CapabilityUnavailable(_) => "capability_unavailable",
            Self::NavigationTimeout { .. } => "navigation_timeout",
            Self::Fetch { .. } | Self::HttpStatus { .. } => "fetch_failure",
            Self::Parse { .. } => "parse_failure",
            Self::Browser(_) | Self::NotInitialized => "browser_failure",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}
