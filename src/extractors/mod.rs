//! Format-specific extractors
//!
//! Each extractor returns `ExtractResult<ExtractionResult>`; turning failures
//! into fallbacks or degraded results is the dispatcher's job.

pub mod document;
pub mod image;
pub mod tabular;
pub mod video;
pub mod webpage;

pub use webpage::extract_from_html;
