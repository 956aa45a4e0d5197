//! Rendered page retrieval
//!
//! `PageRenderer` is the seam between extraction and the browser. The
//! production implementation is `BrowserSession`; tests substitute an
//! in-memory renderer.

use std::future::Future;

use crate::error::ExtractResult;

pub mod page_timeout;
pub mod session;

pub use page_timeout::with_page_timeout;
pub use session::{BrowserSession, BrowserWrapper};

/// Fetches fully rendered HTML for a URL
pub trait PageRenderer: Send + Sync {
    /// Acquire the underlying browser. Calling on an open renderer is a no-op.
    fn open(&mut self) -> impl Future<Output = ExtractResult<()>> + Send;

    /// Render `url` in a fresh page and return its serialized DOM
    ///
    /// Navigation failures and timeouts are tolerated; only the DOM read can
    /// fail. Fails with `ExtractError::NotInitialized` when not open.
    fn fetch_rendered(&self, url: &str) -> impl Future<Output = ExtractResult<String>> + Send;

    /// Release the browser. Idempotent.
    fn close(&mut self) -> impl Future<Output = ()> + Send;

    fn is_open(&self) -> bool;
}
