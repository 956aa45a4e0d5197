//! Runtime capability detection
//!
//! Specialized extractors depend on things a deployment may not have: a
//! usable HTTP stack for video metadata, the PDF parser (cargo feature
//! `pdf`), and a `tesseract` binary for OCR. Each one is probed exactly once
//! when the registry is built. Failures are logged as warnings and recorded
//! as unavailable; the dispatcher then routes those formats to the generic
//! webpage extractor.

use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::ExtractorConfig;
use crate::format::ContentFormat;

/// Read-only table of which specialized formats can be extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityRegistry {
    video: bool,
    document: bool,
    tabular: bool,
    image: bool,
    ocr_binary: Option<PathBuf>,
}

impl CapabilityRegistry {
    /// Probe every specialized capability once
    #[must_use]
    pub fn detect(config: &ExtractorConfig) -> Self {
        let video = record(ContentFormat::Video, config, probe_video(config));
        let document = record(ContentFormat::Document, config, probe_document());
        let tabular = record(ContentFormat::Tabular, config, Ok(()));

        let ocr_binary = match probe_tesseract(config.tesseract_path().map(PathBuf::as_path)) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("tesseract not available: {e:#}");
                None
            }
        };
        let image = record(
            ContentFormat::Image,
            config,
            ocr_binary
                .as_ref()
                .map(|_| ())
                .ok_or_else(|| anyhow!("no tesseract binary")),
        );

        let registry = Self {
            video,
            document,
            tabular,
            image,
            ocr_binary,
        };
        info!(
            video = registry.video,
            document = registry.document,
            tabular = registry.tabular,
            image = registry.image,
            "Capability detection complete"
        );
        registry
    }

    /// Registry with every format marked available and no OCR binary resolved
    #[must_use]
    pub fn all_available() -> Self {
        Self {
            video: true,
            document: true,
            tabular: true,
            image: true,
            ocr_binary: None,
        }
    }

    /// Registry with every specialized format marked unavailable
    #[must_use]
    pub fn none_available() -> Self {
        Self {
            video: false,
            document: false,
            tabular: false,
            image: false,
            ocr_binary: None,
        }
    }

    /// Override one entry; the webpage format cannot be switched off
    #[must_use]
    pub fn with_format(mut self, format: ContentFormat, available: bool) -> Self {
        match format {
            ContentFormat::Video => self.video = available,
            ContentFormat::Document => self.document = available,
            ContentFormat::Tabular => self.tabular = available,
            ContentFormat::Image => self.image = available,
            ContentFormat::Webpage => {}
        }
        self
    }

    #[must_use]
    pub fn with_ocr_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.ocr_binary = Some(path.into());
        self
    }

    #[must_use]
    pub fn is_available(&self, format: ContentFormat) -> bool {
        match format {
            ContentFormat::Video => self.video,
            ContentFormat::Document => self.document,
            ContentFormat::Tabular => self.tabular,
            ContentFormat::Image => self.image,
            ContentFormat::Webpage => true,
        }
    }

    /// Resolved tesseract executable, when OCR was detected
    #[must_use]
    pub fn ocr_binary(&self) -> Option<&Path> {
        self.ocr_binary.as_deref()
    }

    /// Formats currently available, in classification order
    #[must_use]
    pub fn available_formats(&self) -> Vec<ContentFormat> {
        ContentFormat::ALL
            .into_iter()
            .filter(|f| self.is_available(*f))
            .collect()
    }
}

fn record(format: ContentFormat, config: &ExtractorConfig, probe: Result<()>) -> bool {
    if config.is_disabled(format) {
        info!("{format} extraction disabled by configuration");
        return false;
    }
    match probe {
        Ok(()) => true,
        Err(e) => {
            warn!("{format} extraction not available, falling back to webpage: {e:#}");
            false
        }
    }
}

fn probe_video(config: &ExtractorConfig) -> Result<()> {
    reqwest::Client::builder()
        .user_agent(config.user_agent())
        .timeout(config.http_timeout())
        .build()
        .map(|_| ())
        .context("Failed to initialize video metadata client")
}

#[cfg(feature = "pdf")]
fn probe_document() -> Result<()> {
    Ok(())
}

#[cfg(not(feature = "pdf"))]
fn probe_document() -> Result<()> {
    Err(anyhow!("built without the `pdf` feature"))
}

/// Resolve the tesseract executable from an explicit path or `PATH`
fn probe_tesseract(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(anyhow!(
            "configured tesseract path does not exist: {}",
            path.display()
        ));
    }
    which::which("tesseract").context("tesseract not found on PATH")
}
