//! Bounded breadth-first crawler
//!
//! Levels are processed one at a time. Each level is admitted first (visited
//! check, domain filter, remaining page budget) and then extracted through an
//! ordered buffered stream, so `max_concurrent_pages = 1` is strictly
//! sequential and higher values never reorder results.

use futures::StreamExt;
use futures::stream;
use log::{debug, info, warn};
use std::time::Instant;

use super::crawl_types::{CrawlResults, CrawlState, CrawlSummary};
use crate::browser::PageRenderer;
use crate::config::CrawlOptions;
use crate::dispatcher::ExtractorDispatcher;
use crate::fetch::ContentFetcher;
use crate::utils::{host_matches_any, is_valid_url};

/// Whether a URL may be extracted under the given options
#[must_use]
pub fn should_visit_url(url: &str, options: &CrawlOptions) -> bool {
    if !is_valid_url(url) {
        return false;
    }

    // An empty allow-list admits nothing
    if let Some(allowed_domains) = options.allowed_domains()
        && !host_matches_any(url, allowed_domains)
    {
        return false;
    }

    true
}

/// Crawler owning a dispatcher and, through it, the browser session
pub struct Crawler<R, F> {
    dispatcher: ExtractorDispatcher<R, F>,
}

impl<R: PageRenderer, F: ContentFetcher> Crawler<R, F> {
    pub fn new(dispatcher: ExtractorDispatcher<R, F>) -> Self {
        Self { dispatcher }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &ExtractorDispatcher<R, F> {
        &self.dispatcher
    }

    pub fn into_dispatcher(self) -> ExtractorDispatcher<R, F> {
        self.dispatcher
    }

    /// Crawl from `start_url` within the bounds of `options`
    pub async fn crawl(&mut self, start_url: &str, options: &CrawlOptions) -> CrawlResults {
        self.crawl_with_summary(start_url, options).await.0
    }

    /// Crawl and also report totals
    ///
    /// The browser session is opened once before the first level and closed
    /// once after the last, whichever bound ends the crawl. Zero bounds return
    /// immediately without launching anything.
    pub async fn crawl_with_summary(
        &mut self,
        start_url: &str,
        options: &CrawlOptions,
    ) -> (CrawlResults, CrawlSummary) {
        let started = Instant::now();
        let mut state = CrawlState::new(start_url);

        if options.max_depth() == 0 || options.max_pages() == 0 {
            debug!(target: "urlextract::crawl", "Crawl bounds are zero, nothing to do");
            return (CrawlResults::new(), CrawlSummary::from_state(&state, started.elapsed()));
        }

        info!(
            target: "urlextract::crawl",
            "Starting crawl of {start_url} (max_depth: {}, max_pages: {}, concurrency: {})",
            options.max_depth(),
            options.max_pages(),
            options.max_concurrent_pages()
        );

        if let Err(e) = self.dispatcher.open().await {
            warn!(
                target: "urlextract::crawl",
                "Browser session failed to open, rendered pages will degrade: {e}"
            );
        }

        let results = self.run_levels(&mut state, options).await;

        self.dispatcher.close().await;

        let summary = CrawlSummary::from_state(&state, started.elapsed());
        info!(
            target: "urlextract::crawl",
            "Crawl finished: {} pages ({} degraded), {} levels, {} URLs left in frontier, {:?}",
            summary.pages_processed,
            summary.degraded_pages,
            summary.levels_completed,
            summary.frontier_remaining,
            summary.elapsed
        );
        (results, summary)
    }

    async fn run_levels(&self, state: &mut CrawlState, options: &CrawlOptions) -> CrawlResults {
        let mut results = CrawlResults::new();
        let concurrency = options.max_concurrent_pages().max(1);

        while !state.frontier.is_empty()
            && state.depth < options.max_depth()
            && state.pages_processed < options.max_pages()
        {
            let level = state.take_level();
            let admitted = admit_level(state, level, options);
            debug!(
                target: "urlextract::crawl",
                "Level {}: {} URLs admitted",
                state.depth,
                admitted.len()
            );

            let dispatcher = &self.dispatcher;
            let extracted: Vec<_> = stream::iter(admitted)
                .map(move |url| async move {
                    let result = dispatcher.extract(&url).await;
                    (url, result)
                })
                .buffered(concurrency)
                .collect()
                .await;

            for (url, result) in extracted {
                state.pages_processed += 1;
                if let Some(error) = result.error() {
                    state.degraded_pages += 1;
                    warn!(target: "urlextract::crawl", "Failed to extract {url}: {error}");
                } else {
                    debug!(target: "urlextract::crawl", "Extracted {url}");
                }

                for link in &result.links {
                    if is_valid_url(link) {
                        state.enqueue(link);
                    }
                }
                results.insert(url, result);
            }

            state.depth += 1;
        }

        results
    }
}

/// Select this level's URLs to extract and mark them visited
///
/// Skips visited URLs and URLs outside `allowed_domains`, and stops once the
/// remaining page budget is used up.
fn admit_level(state: &mut CrawlState, level: Vec<String>, options: &CrawlOptions) -> Vec<String> {
    let budget = options.max_pages().saturating_sub(state.pages_processed);
    let mut admitted = Vec::new();

    for url in level {
        if admitted.len() >= budget {
            debug!(target: "urlextract::crawl", "Page budget reached, deferring {url}");
            state.frontier.insert(url);
            continue;
        }
        if state.visited.contains(&url) {
            continue;
        }
        if !should_visit_url(&url, options) {
            debug!(target: "urlextract::crawl", "Skipping {url}: outside crawl scope");
            continue;
        }
        state.visited.insert(url.clone());
        admitted.push(url);
    }

    admitted
}
