//! URL format classification
//!
//! Maps a URL string to the extractor family that should handle it using
//! syntactic rules only. No network access happens here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Host markers that identify a video page
const VIDEO_HOST_MARKERS: &[&str] = &["youtube.com", "youtu.be"];

/// Extensions routed to the document extractor
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

/// Extensions routed to the tabular extractor
const TABULAR_EXTENSIONS: &[&str] = &["csv"];

/// Extensions routed to the OCR extractor
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

/// Extractor family for a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Video,
    Document,
    Tabular,
    Image,
    Webpage,
}

impl ContentFormat {
    /// All formats, in classification rule order
    pub const ALL: [Self; 5] = [
        Self::Video,
        Self::Document,
        Self::Tabular,
        Self::Image,
        Self::Webpage,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Document => "document",
            Self::Tabular => "tabular",
            Self::Image => "image",
            Self::Webpage => "webpage",
        }
    }

    /// Whether this format needs a specialized capability
    #[must_use]
    pub const fn is_specialized(&self) -> bool {
        !matches!(self, Self::Webpage)
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" | "youtube" => Ok(Self::Video),
            "document" | "pdf" => Ok(Self::Document),
            "tabular" | "csv" => Ok(Self::Tabular),
            "image" | "ocr" => Ok(Self::Image),
            "webpage" | "html" => Ok(Self::Webpage),
            other => Err(format!("unknown content format '{other}'")),
        }
    }
}

/// Classify a URL. First matching rule wins:
/// video host, `.pdf`, `.csv`, image extension, otherwise webpage.
///
/// Extension matching is case-insensitive and ignores query strings and
/// fragments. Unparsable input is matched against the raw string so the
/// function stays total.
#[must_use]
pub fn classify(url: &str) -> ContentFormat {
    let (host, path) = match Url::parse(url) {
        Ok(parsed) => (
            parsed.host_str().unwrap_or_default().to_ascii_lowercase(),
            parsed.path().to_ascii_lowercase(),
        ),
        Err(_) => {
            let raw = url.to_ascii_lowercase();
            let path = raw
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string();
            (raw, path)
        }
    };

    if VIDEO_HOST_MARKERS.iter().any(|marker| host.contains(marker)) {
        return ContentFormat::Video;
    }

    match path_extension(&path) {
        Some(ext) if DOCUMENT_EXTENSIONS.contains(&ext) => ContentFormat::Document,
        Some(ext) if TABULAR_EXTENSIONS.contains(&ext) => ContentFormat::Tabular,
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => ContentFormat::Image,
        _ => ContentFormat::Webpage,
    }
}

/// Extension of the last path segment, if any
fn path_extension(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_examples() {
        assert_eq!(classify("https://youtu.be/abc"), ContentFormat::Video);
        assert_eq!(
            classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            ContentFormat::Video
        );
        assert_eq!(classify("https://x.com/f.pdf"), ContentFormat::Document);
        assert_eq!(classify("https://x.com/f.csv"), ContentFormat::Tabular);
        assert_eq!(classify("https://x.com/img.PNG"), ContentFormat::Image);
        assert_eq!(classify("https://x.com/page"), ContentFormat::Webpage);
    }

    #[test]
    fn test_video_host_wins_over_extension() {
        assert_eq!(
            classify("https://youtube.com/files/report.pdf"),
            ContentFormat::Video
        );
    }

    #[test]
    fn test_query_string_does_not_hide_extension() {
        assert_eq!(
            classify("https://x.com/data/export.csv?download=1"),
            ContentFormat::Tabular
        );
        assert_eq!(classify("https://x.com/a.jpeg#top"), ContentFormat::Image);
    }

    #[test]
    fn test_extension_only_in_query_is_webpage() {
        assert_eq!(
            classify("https://x.com/view?file=a.pdf"),
            ContentFormat::Webpage
        );
    }

    #[test]
    fn test_dotfile_and_directory_are_webpage() {
        assert_eq!(classify("https://x.com/.csv"), ContentFormat::Webpage);
        assert_eq!(classify("https://x.com/dir.pdf/"), ContentFormat::Webpage);
    }

    #[test]
    fn test_unparsable_input_still_classified() {
        assert_eq!(classify("not a url"), ContentFormat::Webpage);
        assert_eq!(classify("relative/report.PDF"), ContentFormat::Document);
        assert_eq!(classify(""), ContentFormat::Webpage);
    }

    #[test]
    fn test_format_round_trips_through_str() {
        for format in ContentFormat::ALL {
            assert_eq!(format.as_str().parse::<ContentFormat>(), Ok(format));
        }
        assert!("spreadsheet".parse::<ContentFormat>().is_err());
    }
}
