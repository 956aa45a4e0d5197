//! Video page extraction
//!
//! Metadata comes from the player response JSON embedded in the public watch
//! page. Captions come from a separate transcript service; that lookup may
//! fail on its own without failing the extraction.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::ExtractorConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::fetch::ContentFetcher;
use crate::format::ContentFormat;
use crate::schema::ExtractionResult;
use crate::utils::{NO_DESCRIPTION, NO_TRANSCRIPT, VIDEO_WATCH_URL};

const PLAYER_RESPONSE_MARKER: &str = "ytInitialPlayerResponse";

/// Path prefixes that carry the id as the following segment
const ID_PATH_PREFIXES: &[&str] = &["shorts", "embed", "live", "v"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    video_details: Option<VideoDetails>,
}

/// Subset of `videoDetails` the extractor uses
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    length_seconds: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    thumbnail: Option<ThumbnailList>,
}

#[derive(Debug, Clone, Deserialize)]
struct ThumbnailList {
    #[serde(default)]
    thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
struct Thumbnail {
    url: String,
}

impl VideoDetails {
    #[must_use]
    pub fn length_seconds(&self) -> u64 {
        self.length_seconds.trim().parse().unwrap_or(0)
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail
            .as_ref()
            .and_then(|t| t.thumbnails.first())
            .map(|t| t.url.as_str())
    }

    fn description(&self) -> Option<&str> {
        self.short_description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Extract metadata and transcript for a video URL
pub async fn extract<F: ContentFetcher>(
    fetcher: &F,
    config: &ExtractorConfig,
    url: &str,
) -> ExtractResult<ExtractionResult> {
    let video_id = parse_video_id(url)
        .ok_or_else(|| ExtractError::parse(ContentFormat::Video, "no video id in URL"))?;

    let watch_url = format!("{VIDEO_WATCH_URL}?v={video_id}");
    let page = fetcher.fetch_text(&watch_url).await?;
    let details = parse_player_response(&page)?;

    let transcript = match config.transcript_service_url() {
        Some(base) => match fetch_transcript(fetcher, base, &video_id).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(video_id, "Transcript unavailable: {e}");
                None
            }
        },
        None => None,
    };

    Ok(build_result(url, &video_id, &details, transcript))
}

/// Pull the 11-character video id out of the supported URL shapes
#[must_use]
pub fn parse_video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();

    let candidate = if host.ends_with("youtu.be") {
        parsed.path_segments()?.next().map(str::to_string)
    } else if host.contains("youtube.com") {
        let from_query = parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned());
        from_query.or_else(|| {
            let mut segments = parsed.path_segments()?;
            let prefix = segments.next()?;
            if ID_PATH_PREFIXES.contains(&prefix) {
                segments.next().map(str::to_string)
            } else {
                None
            }
        })
    } else {
        None
    };

    candidate.filter(|id| is_valid_video_id(id))
}

fn is_valid_video_id(id: &str) -> bool {
    id.len() == 11
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Locate and decode the embedded player response of a watch page
pub fn parse_player_response(page: &str) -> ExtractResult<VideoDetails> {
    let start = page
        .find(PLAYER_RESPONSE_MARKER)
        .and_then(|pos| page[pos..].find('{').map(|brace| pos + brace))
        .ok_or_else(|| ExtractError::parse(ContentFormat::Video, "player response not found"))?;

    // Only the first JSON value matters; the page continues with more script
    let value = serde_json::Deserializer::from_str(&page[start..])
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| ExtractError::parse(ContentFormat::Video, "empty player response"))?
        .map_err(|e| ExtractError::parse(ContentFormat::Video, e.to_string()))?;

    let response: PlayerResponse = serde_json::from_value(value)
        .map_err(|e| ExtractError::parse(ContentFormat::Video, e.to_string()))?;

    response
        .video_details
        .ok_or_else(|| ExtractError::parse(ContentFormat::Video, "player response has no videoDetails"))
}

async fn fetch_transcript<F: ContentFetcher>(
    fetcher: &F,
    base: &str,
    video_id: &str,
) -> ExtractResult<String> {
    let url = format!("{}/transcript/{video_id}", base.trim_end_matches('/'));
    let body = fetcher.fetch_text(&url).await?;
    let response: TranscriptResponse = serde_json::from_str(&body)
        .map_err(|e| ExtractError::fetch(&url, format!("malformed transcript response: {e}")))?;

    match response.transcript {
        Some(text) if response.success && !text.trim().is_empty() => Ok(text),
        _ => Err(ExtractError::fetch(
            url,
            response
                .error
                .unwrap_or_else(|| "Failed to get transcript".to_string()),
        )),
    }
}

fn build_result(
    url: &str,
    video_id: &str,
    details: &VideoDetails,
    transcript: Option<String>,
) -> ExtractionResult {
    let seconds = details.length_seconds();
    let transcript_available = transcript.is_some();
    let content = format!(
        "Title: {}\nChannel: {}\nDuration: {}m {}s\nDescription: {}\n\nTranscript:\n{}",
        details.title,
        details.author,
        seconds / 60,
        seconds % 60,
        details.description().unwrap_or(NO_DESCRIPTION),
        transcript.as_deref().unwrap_or(NO_TRANSCRIPT),
    );

    ExtractionResult::new(content.trim())
        .with_metadata("title", details.title.as_str())
        .with_metadata("author", details.author.as_str())
        .with_metadata("duration", seconds)
        .with_optional_metadata("description", details.description())
        .with_metadata("url", url)
        .with_metadata("video_id", video_id)
        .with_optional_metadata("thumbnail_url", details.thumbnail_url())
        .with_metadata("transcript_available", transcript_available)
        .with_media_url(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATCH_PAGE: &str = r#"<html><script>var ytInitialPlayerResponse = {"playabilityStatus":{"status":"OK"},"videoDetails":{"videoId":"dQw4w9WgXcQ","title":"Never Gonna","lengthSeconds":"212","author":"Rick","shortDescription":"A classic","thumbnail":{"thumbnails":[{"url":"https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg","width":120}]}}};var meta = {};</script></html>"#;

    #[test]
    fn test_video_id_shapes() {
        let id = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(parse_video_id("https://youtu.be/dQw4w9WgXcQ"), id);
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42"),
            id
        );
        assert_eq!(parse_video_id("https://youtube.com/shorts/dQw4w9WgXcQ"), id);
        assert_eq!(parse_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"), id);
        assert_eq!(parse_video_id("https://m.youtube.com/live/dQw4w9WgXcQ"), id);
    }

    #[test]
    fn test_video_id_rejects_channel_pages() {
        assert_eq!(parse_video_id("https://youtu.be/abc"), None);
        assert_eq!(parse_video_id("https://www.youtube.com/@channel"), None);
        assert_eq!(parse_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
    }

    #[test]
    fn test_player_response_parsed() {
        let details = parse_player_response(WATCH_PAGE).unwrap();
        assert_eq!(details.title, "Never Gonna");
        assert_eq!(details.author, "Rick");
        assert_eq!(details.length_seconds(), 212);
        assert_eq!(
            details.thumbnail_url(),
            Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg")
        );
    }

    #[test]
    fn test_missing_player_response_is_parse_error() {
        let err = parse_player_response("<html>consent wall</html>").unwrap_err();
        assert_eq!(err.kind(), "parse_failure");
    }

    #[test]
    fn test_content_block_without_transcript() {
        let details = parse_player_response(WATCH_PAGE).unwrap();
        let url = "https://youtu.be/dQw4w9WgXcQ";
        let result = build_result(url, "dQw4w9WgXcQ", &details, None);

        assert_eq!(
            result.content,
            format!(
                "Title: Never Gonna\nChannel: Rick\nDuration: 3m 32s\nDescription: A classic\n\nTranscript:\n{NO_TRANSCRIPT}"
            )
        );
        assert_eq!(result.metadata["transcript_available"], false);
        assert_eq!(result.metadata["duration"], 212);
        assert!(result.links.is_empty());
        assert!(result.media_urls.contains(url));
    }
}
