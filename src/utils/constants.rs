//! Shared configuration constants
//!
//! Default values used across the extraction pipeline, kept here to avoid
//! magic numbers in the extractors and the crawl engine.

/// Default maximum crawl depth: 3 levels
///
/// Limits how deep the crawler will follow links from the starting URL.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Default maximum number of pages per crawl
pub const DEFAULT_MAX_PAGES: usize = 10;

/// Default number of in-flight extractions per crawl level (1 = sequential)
pub const DEFAULT_MAX_CONCURRENT_PAGES: usize = 1;

/// Upper bound accepted for `max_concurrent_pages`
pub const MAX_CONCURRENT_PAGES_LIMIT: usize = 16;

/// Navigation deadline for rendered pages
///
/// Slow pages are not fatal: once this fires the partially rendered DOM is
/// read and extraction carries on.
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 15;

/// Deadline for reading the DOM after navigation settled or timed out
pub const DEFAULT_CONTENT_TIMEOUT_SECS: u64 = 10;

/// Timeout for plain HTTP fetches (documents, CSV, images, video metadata)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the caption/transcript service
pub const DEFAULT_TRANSCRIPT_SERVICE_URL: &str = "http://localhost:3001";

/// Watch page used to read video metadata
pub const VIDEO_WATCH_URL: &str = "https://www.youtube.com/watch";

/// Transcript placeholder when captions cannot be retrieved
pub const NO_TRANSCRIPT: &str = "No transcript available for this video.";

/// Description placeholder for videos without one
pub const NO_DESCRIPTION: &str = "No description available";

/// Content placeholder when OCR produced nothing
pub const NO_RECOGNIZED_TEXT: &str = "No text recognized in image";

/// Chrome user agent string
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Maximum body accepted from a plain HTTP fetch
///
/// Larger responses are rejected while streaming instead of being buffered.
pub const MAX_FETCH_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Deadline for one tesseract run
pub const OCR_TIMEOUT_SECS: u64 = 120;
