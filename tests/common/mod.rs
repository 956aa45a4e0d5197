//! Test utilities shared by the integration tests
//!
//! `MockRenderer` and `MockFetcher` serve fixtures from memory and record
//! every call, so dispatch and crawl behaviour can be checked without a
//! browser or network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kodegen_tools_urlextract::{
    CapabilityRegistry, ContentFetcher, ExtractError, ExtractResult, ExtractorConfig,
    ExtractorDispatcher, PageRenderer,
};

/// Shared, cloneable call log
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| *e == entry).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

/// In-memory `PageRenderer`
#[derive(Debug, Default)]
pub struct MockRenderer {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    fail_open: bool,
    open: bool,
    /// URLs passed to `fetch_rendered`, in call order
    pub fetches: CallLog,
    /// `open` / `close` calls, in call order
    pub lifecycle: CallLog,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Renderer that is already open, for dispatcher tests
    pub fn opened(mut self) -> Self {
        self.open = true;
        self
    }
}

impl PageRenderer for MockRenderer {
    async fn open(&mut self) -> ExtractResult<()> {
        self.lifecycle.push("open");
        if self.fail_open {
            return Err(ExtractError::Browser("Failed to launch browser".to_string()));
        }
        self.open = true;
        Ok(())
    }

    async fn fetch_rendered(&self, url: &str) -> ExtractResult<String> {
        if !self.open {
            return Err(ExtractError::NotInitialized);
        }
        self.fetches.push(url);
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ExtractError::fetch(url, "net::ERR_NAME_NOT_RESOLVED"))
    }

    async fn close(&mut self) {
        self.lifecycle.push("close");
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

/// In-memory `ContentFetcher`; unknown URLs answer 404
#[derive(Debug, Default)]
pub struct MockFetcher {
    bodies: HashMap<String, Vec<u8>>,
    pub fetches: CallLog,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }
}

impl ContentFetcher for MockFetcher {
    async fn fetch_bytes(&self, url: &str) -> ExtractResult<Vec<u8>> {
        self.fetches.push(url);
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| ExtractError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// HTML page with a title, a `<main>` paragraph and one anchor per link
pub fn html_page(title: &str, text: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{href}">{href}</a>"#))
        .collect();
    format!(
        "<!DOCTYPE html><html><head><title>{title}</title></head>\
         <body><main><p>{text}</p></main><nav>{anchors}</nav></body></html>"
    )
}

pub fn dispatcher(
    renderer: MockRenderer,
    fetcher: MockFetcher,
    capabilities: CapabilityRegistry,
) -> ExtractorDispatcher<MockRenderer, MockFetcher> {
    ExtractorDispatcher::new(
        Arc::new(ExtractorConfig::default()),
        Arc::new(capabilities),
        renderer,
        fetcher,
    )
}
