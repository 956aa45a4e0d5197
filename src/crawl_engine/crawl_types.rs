//! Core types for a single crawl.
//!
//! `CrawlState` lives for exactly one `crawl()` call and is never shared;
//! `CrawlSummary` is what is left of it once the crawl returns.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::schema::ExtractionResult;

/// Crawl output: URL to result, in visit order
pub type CrawlResults = IndexMap<String, ExtractionResult>;

/// Mutable breadth-first bookkeeping for one crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlState {
    pub(crate) visited: IndexSet<String>,
    /// FIFO of discovered, not yet visited URLs; unique
    pub(crate) frontier: IndexSet<String>,
    pub(crate) depth: usize,
    pub(crate) pages_processed: usize,
    pub(crate) degraded_pages: usize,
}

impl CrawlState {
    /// Seed the frontier with `start_url` in the same serialized form that
    /// resolved links take, so the start page is not visited twice
    #[must_use]
    pub fn new(start_url: &str) -> Self {
        let seed = Url::parse(start_url).map_or_else(|_| start_url.to_string(), String::from);
        let mut frontier = IndexSet::new();
        frontier.insert(seed);
        Self {
            frontier,
            ..Self::default()
        }
    }

    /// Move the whole frontier out as this level's URLs
    pub(crate) fn take_level(&mut self) -> Vec<String> {
        std::mem::take(&mut self.frontier).into_iter().collect()
    }

    /// Queue a discovered link unless it was already visited
    pub(crate) fn enqueue(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.frontier.insert(url.to_string())
    }

    #[must_use]
    pub fn visited(&self) -> &IndexSet<String> {
        &self.visited
    }

    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn pages_processed(&self) -> usize {
        self.pages_processed
    }
}

/// Totals reported after a crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub pages_processed: usize,
    pub degraded_pages: usize,
    pub levels_completed: usize,
    pub frontier_remaining: usize,
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

impl CrawlSummary {
    pub(crate) fn from_state(state: &CrawlState, elapsed: Duration) -> Self {
        Self {
            pages_processed: state.pages_processed,
            degraded_pages: state.degraded_pages,
            levels_completed: state.depth,
            frontier_remaining: state.frontier.len(),
            elapsed,
        }
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u128(value.as_millis())
    }
}
