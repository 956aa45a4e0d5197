//! Crawl Engine Module
//!
//! Bounded breadth-first crawling on top of the extractor dispatcher.

pub mod crawl_types;
pub mod crawler;

pub use crawl_types::{CrawlResults, CrawlState, CrawlSummary};
pub use crawler::{Crawler, should_visit_url};
