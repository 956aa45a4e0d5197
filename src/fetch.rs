//! Plain HTTP retrieval for non-rendered formats
//!
//! Documents, tabular files, images, video watch pages and transcript lookups
//! are fetched as raw bytes without a browser. The `ContentFetcher` trait is
//! the seam the dispatcher is generic over, so tests can serve fixtures from
//! memory.

use futures::StreamExt;
use reqwest::Client;
use std::future::Future;

use crate::config::ExtractorConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::utils::MAX_FETCH_BODY_BYTES;

/// Source of raw response bodies
pub trait ContentFetcher: Send + Sync {
    /// Fetch the full body of `url`. Non-success statuses are errors.
    fn fetch_bytes(&self, url: &str) -> impl Future<Output = ExtractResult<Vec<u8>>> + Send;

    /// Fetch `url` and decode the body as UTF-8, replacing invalid sequences
    fn fetch_text(&self, url: &str) -> impl Future<Output = ExtractResult<String>> + Send {
        async move {
            let bytes = self.fetch_bytes(url).await?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// `reqwest`-backed fetcher with a size-capped streaming reader
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    /// Build a client carrying the configured user agent and timeout
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Config` if the TLS backend cannot initialize.
    pub fn new(config: &ExtractorConfig) -> ExtractResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| ExtractError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            max_body_bytes: MAX_FETCH_BODY_BYTES,
        })
    }

    #[must_use]
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }
}

impl ContentFetcher for HttpFetcher {
    async fn fetch_bytes(&self, url: &str) -> ExtractResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header("Accept", "*/*")
            .send()
            .await
            .map_err(|e| ExtractError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let expected_size = response.content_length().unwrap_or(0);
        if expected_size > self.max_body_bytes as u64 {
            return Err(ExtractError::fetch(
                url,
                format!(
                    "body too large: {expected_size} bytes exceeds limit of {} bytes",
                    self.max_body_bytes
                ),
            ));
        }

        let mut buffer = Vec::with_capacity(usize::try_from(expected_size).unwrap_or(0));
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ExtractError::fetch(url, e))?;
            if buffer.len() + chunk.len() > self.max_body_bytes {
                return Err(ExtractError::fetch(
                    url,
                    format!("body exceeded {} bytes while streaming", self.max_body_bytes),
                ));
            }
            buffer.extend_from_slice(&chunk);
        }

        tracing::debug!(url, bytes = buffer.len(), "Fetched body");
        Ok(buffer)
    }
}
