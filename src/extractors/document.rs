//! PDF document extraction
//!
//! Bytes are fetched over plain HTTP and parsed on the blocking pool, one
//! text block per page. Built only with the `pdf` feature; without it the
//! capability registry reports documents unavailable and this path is never
//! taken.

use crate::error::{ExtractError, ExtractResult};
use crate::fetch::ContentFetcher;
use crate::format::ContentFormat;
use crate::schema::ExtractionResult;
use crate::utils::extract_urls_from_text;

/// Fetch and parse a PDF
pub async fn extract<F: ContentFetcher>(fetcher: &F, url: &str) -> ExtractResult<ExtractionResult> {
    let bytes = fetcher.fetch_bytes(url).await?;
    let size = bytes.len();

    // pdf parsing is CPU bound and may panic on hostile input
    let pages = tokio::task::spawn_blocking(move || parse_pages(&bytes))
        .await
        .map_err(|e| ExtractError::parse(ContentFormat::Document, format!("parser aborted: {e}")))??;

    tracing::debug!(url, bytes = size, pages = pages.len(), "Parsed document");
    build_result(url, &pages)
}

#[cfg(feature = "pdf")]
fn parse_pages(bytes: &[u8]) -> ExtractResult<Vec<String>> {
    pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::parse(ContentFormat::Document, e.to_string()))
}

#[cfg(not(feature = "pdf"))]
fn parse_pages(_bytes: &[u8]) -> ExtractResult<Vec<String>> {
    Err(ExtractError::CapabilityUnavailable(ContentFormat::Document))
}

/// Assemble the result from per-page text
pub(crate) fn build_result(url: &str, pages: &[String]) -> ExtractResult<ExtractionResult> {
    let text = pages
        .iter()
        .map(|page| clean_text(page))
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    if text.is_empty() {
        return Err(ExtractError::parse(
            ContentFormat::Document,
            "no extractable text (may be image-only)",
        ));
    }

    let title = extract_title(&text);
    let mut result = ExtractionResult::new(text.as_str())
        .with_metadata("pages", pages.len())
        .with_metadata("characters", text.chars().count())
        .with_optional_metadata("title", title)
        .with_metadata("url", url);
    result.links = extract_urls_from_text(&text).into_iter().collect();
    Ok(result)
}

/// Trim lines and collapse runs of blank lines to one
fn clean_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .fold(Vec::<&str>::new(), |mut acc, line| {
            if !line.is_empty() || acc.last().is_some_and(|l| !l.is_empty()) {
                acc.push(line);
            }
            acc
        })
        .join("\n")
        .trim()
        .to_string()
}

/// First plausible title line among the opening lines
fn extract_title(text: &str) -> Option<String> {
    text.lines().take(5).map(str::trim).find_map(|line| {
        let plausible = (10..=200).contains(&line.len())
            && !line.starts_with("http")
            && !line.starts_with("www.")
            && !line.chars().all(|c| c.is_numeric() || c.is_whitespace());
        plausible.then(|| line.to_string())
    })
}
