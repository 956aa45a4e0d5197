//! Timeout utilities for page operations
//!
//! Browser calls can hang indefinitely when Chrome stalls; every CDP
//! round-trip that is not already covered by the navigation deadline goes
//! through `with_page_timeout`.

use anyhow::Result;
use std::future::Future;
use std::time::Duration;

/// Run a page operation with an explicit deadline
///
/// # Returns
/// * `Ok(T)` - Operation completed successfully
/// * `Err` - Either the operation failed or the timeout was reached; the
///   message names `operation_name` so the two cases are distinguishable
pub async fn with_page_timeout<F, T, E>(
    operation: F,
    timeout: Duration,
    operation_name: &str,
) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: Into<anyhow::Error>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result.map_err(|e| e.into().context(format!("{operation_name} failed"))),
        Err(_) => Err(anyhow::anyhow!(
            "{operation_name} timeout after {} seconds",
            timeout.as_secs()
        )),
    }
}
