//! Delimited text extraction
//!
//! The first record names the columns. Rows keep their cells as strings in
//! header order; ragged rows are accepted rather than rejected.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::Value;

use crate::error::{ExtractError, ExtractResult};
use crate::fetch::ContentFetcher;
use crate::format::ContentFormat;
use crate::schema::{ExtractionResult, NO_CONTENT, Row};

/// Fetch and parse a CSV file
pub async fn extract<F: ContentFetcher>(fetcher: &F, url: &str) -> ExtractResult<ExtractionResult> {
    let text = fetcher.fetch_text(url).await?;
    let result = extract_from_text(&text)?.with_metadata("url", url);
    tracing::debug!(url, rows = result.data.as_ref().map_or(0, Vec::len), "Parsed table");
    Ok(result)
}

/// Parse CSV text into rows plus a line-per-row rendering
pub fn extract_from_text(text: &str) -> ExtractResult<ExtractionResult> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ExtractError::parse(ContentFormat::Tabular, e.to_string()))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ExtractError::parse(ContentFormat::Tabular, e.to_string()))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(to_row(&headers, &record));
    }

    let content = rows.iter().map(format_row).collect::<Vec<_>>().join("\n");
    let fields: Vec<Value> = headers.iter().map(Value::from).collect();

    let mut result = ExtractionResult::new(if content.is_empty() {
        NO_CONTENT.to_string()
    } else {
        content
    })
    .with_metadata("rows", rows.len())
    .with_metadata("columns", headers.len())
    .with_metadata("fields", fields);
    result.data = Some(rows);
    Ok(result)
}

/// Pair cells with column names; cells beyond the header become `field_<n>`
fn to_row(headers: &StringRecord, record: &StringRecord) -> Row {
    record
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let key = headers
                .get(i)
                .map_or_else(|| format!("field_{}", i + 1), str::to_string);
            (key, cell.to_string())
        })
        .collect()
}

fn format_row(row: &Row) -> String {
    row.iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
