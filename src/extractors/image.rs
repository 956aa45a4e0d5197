//! Image text recognition
//!
//! The image is downloaded into a temp file that keeps the source extension
//! (tesseract sniffs the format from it) and recognized by the external
//! `tesseract` binary resolved during capability detection.

use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use url::Url;

use crate::error::{ExtractError, ExtractResult};
use crate::fetch::ContentFetcher;
use crate::format::ContentFormat;
use crate::schema::ExtractionResult;
use crate::utils::{NO_RECOGNIZED_TEXT, OCR_TIMEOUT_SECS};

/// Download `url` and run OCR over it
pub async fn extract<F: ContentFetcher>(
    fetcher: &F,
    ocr_binary: Option<&Path>,
    url: &str,
) -> ExtractResult<ExtractionResult> {
    let binary = ocr_binary.ok_or(ExtractError::CapabilityUnavailable(ContentFormat::Image))?;
    let bytes = fetcher.fetch_bytes(url).await?;

    let file = tempfile::Builder::new()
        .prefix("urlextract_ocr_")
        .suffix(&format!(".{}", image_extension(url)))
        .tempfile()?;
    tokio::fs::write(file.path(), &bytes).await?;

    let text = recognize(binary, file.path()).await?;
    tracing::debug!(url, chars = text.len(), "OCR complete");
    Ok(build_result(url, &text))
}

/// Run `tesseract <image> stdout` and return the recognized text
pub async fn recognize(binary: &Path, image: &Path) -> ExtractResult<String> {
    let run = Command::new(binary)
        .arg(image)
        .arg("stdout")
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(Duration::from_secs(OCR_TIMEOUT_SECS), run)
        .await
        .map_err(|_| {
            ExtractError::parse(
                ContentFormat::Image,
                format!("tesseract timed out after {OCR_TIMEOUT_SECS}s"),
            )
        })??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExtractError::parse(
            ContentFormat::Image,
            format!("tesseract exited with {}: {}", output.status, stderr.trim()),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn build_result(url: &str, text: &str) -> ExtractionResult {
    let content = if text.is_empty() { NO_RECOGNIZED_TEXT } else { text };
    ExtractionResult::new(content)
        .with_metadata("type", "image")
        .with_metadata("engine", "tesseract")
        .with_metadata("url", url)
        .with_media_url(url)
}

/// Lowercased extension of the URL path, `png` when there is none
fn image_extension(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            let segment = parsed.path_segments()?.next_back()?.to_string();
            let (_, ext) = segment.rsplit_once('.')?;
            (!ext.is_empty() && ext.len() <= 5).then(|| ext.to_ascii_lowercase())
        })
        .unwrap_or_else(|| "png".to_string())
}
