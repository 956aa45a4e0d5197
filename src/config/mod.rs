//! Configuration module for extraction and crawling
//!
//! `ExtractorConfig` is constructed once and shared by reference with the
//! dispatcher and the crawler. `CrawlOptions` carries the per-call crawl
//! bounds.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{CrawlOptionsBuilder, ExtractorConfigBuilder};
pub use types::{CrawlOptions, ExtractorConfig};
