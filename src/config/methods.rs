//! Environment overlay for `ExtractorConfig`
//!
//! Recognised variables:
//! - `URLEXTRACT_HEADLESS` (`true`/`false`/`1`/`0`)
//! - `URLEXTRACT_NAV_TIMEOUT_SECS`
//! - `URLEXTRACT_HTTP_TIMEOUT_SECS`
//! - `URLEXTRACT_TRANSCRIPT_URL` (empty disables transcript lookup)
//! - `URLEXTRACT_DISABLE` (comma separated formats, e.g. `image,video`)
//! - `TESSERACT_PATH`
//!
//! `CHROMIUM_PATH` is read directly by browser discovery.

use anyhow::{Context, Result, anyhow};

use super::builder::ExtractorConfigBuilder;
use super::types::ExtractorConfig;
use crate::format::ContentFormat;

impl ExtractorConfig {
    /// Defaults overlaid with process environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from an arbitrary lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ExtractorConfigBuilder::default();

        if let Some(value) = lookup("URLEXTRACT_HEADLESS") {
            builder = builder.headless(parse_bool("URLEXTRACT_HEADLESS", &value)?);
        }
        if let Some(value) = lookup("URLEXTRACT_NAV_TIMEOUT_SECS") {
            let secs = value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("URLEXTRACT_NAV_TIMEOUT_SECS='{value}'"))?;
            builder = builder.navigation_timeout_secs(secs);
        }
        if let Some(value) = lookup("URLEXTRACT_HTTP_TIMEOUT_SECS") {
            let secs = value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("URLEXTRACT_HTTP_TIMEOUT_SECS='{value}'"))?;
            builder = builder.http_timeout_secs(secs);
        }
        if let Some(value) = lookup("URLEXTRACT_TRANSCRIPT_URL") {
            let value = value.trim();
            builder = builder.transcript_service_url(if value.is_empty() {
                None
            } else {
                Some(value.trim_end_matches('/').to_string())
            });
        }
        if let Some(value) = lookup("URLEXTRACT_DISABLE") {
            for name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let format = name
                    .parse::<ContentFormat>()
                    .map_err(|e| anyhow!("URLEXTRACT_DISABLE: {e}"))?;
                builder = builder.disable_format(format);
            }
        }
        if let Some(value) = lookup("TESSERACT_PATH")
            && !value.trim().is_empty()
        {
            builder = builder.tesseract_path(value.trim());
        }

        builder.build()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("{key}: expected a boolean, got '{other}'")),
    }
}
