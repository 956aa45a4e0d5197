use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ExtractError;

/// Content marker used when every extraction path failed
pub const FAILED_CONTENT: &str = "Failed to extract content";

/// Content marker used when a page rendered but had no text
pub const NO_CONTENT: &str = "No content could be extracted";

/// One tabular record, column name to cell value, in header order
pub type Row = IndexMap<String, String>;

/// Normalized output of every extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Best-effort plain text; never empty
    pub content: String,
    /// Format-specific facts (title, author, pages, error, ...)
    pub metadata: IndexMap<String, Value>,
    /// Absolute outbound links, in discovery order
    pub links: IndexSet<String>,
    /// Absolute URLs of embedded media
    pub media_urls: IndexSet<String>,
    /// Parsed rows; `Some` only for tabular sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Row>>,
}

impl ExtractionResult {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Structurally valid result that signals failure
    #[must_use]
    pub fn degraded(url: &str, error: &ExtractError) -> Self {
        Self::new(FAILED_CONTENT)
            .with_metadata("url", url)
            .with_metadata("error", error.to_string())
            .with_metadata("error_kind", error.kind())
    }

    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Insert metadata only when a value is present
    #[must_use]
    pub fn with_optional_metadata<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with_metadata(key, v),
            None => self,
        }
    }

    #[must_use]
    pub fn with_media_url(mut self, url: impl Into<String>) -> Self {
        self.media_urls.insert(url.into());
        self
    }

    /// Whether this result came from the failure path
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.metadata.contains_key("error")
    }

    /// Failure reason, if degraded
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.metadata.get("error").and_then(Value::as_str)
    }
}
