mod common;

use common::{MockFetcher, MockRenderer, dispatcher, html_page};
use kodegen_tools_urlextract::{CapabilityRegistry, ContentFormat, FAILED_CONTENT};
use proptest::prelude::*;

const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
const TRANSCRIPT_URL: &str = "http://localhost:3001/transcript/dQw4w9WgXcQ";

const WATCH_PAGE: &str = r#"<html><script>var ytInitialPlayerResponse = {"videoDetails":{"videoId":"dQw4w9WgXcQ","title":"Never Gonna","lengthSeconds":"212","author":"Rick","shortDescription":"A classic"}};</script></html>"#;

#[tokio::test]
async fn unavailable_format_goes_straight_to_webpage() {
    let url = "https://files.example.org/report.pdf";
    let renderer = MockRenderer::new()
        .opened()
        .with_page(url, html_page("Report", "Quarterly numbers", &[]));
    let fetcher = MockFetcher::new().with_body(url, b"%PDF-1.7".to_vec());
    let d = dispatcher(renderer, fetcher, CapabilityRegistry::none_available());

    let result = d.extract(url).await;

    assert!(!result.is_degraded());
    assert_eq!(result.content, "Quarterly numbers");
    assert_eq!(result.metadata["title"], "Report");
    assert!(d.fetcher().fetches.is_empty());
    assert_eq!(d.renderer().fetches.entries(), vec![url]);
}

#[tokio::test]
async fn video_failure_falls_back_to_webpage() {
    let renderer = MockRenderer::new()
        .opened()
        .with_page(VIDEO_URL, html_page("Video page", "Rendered description", &[]));
    let d = dispatcher(renderer, MockFetcher::new(), CapabilityRegistry::all_available());

    let result = d.extract(VIDEO_URL).await;

    assert!(!result.is_degraded());
    assert_eq!(result.content, "Rendered description");
    assert_eq!(d.fetcher().fetches.entries(), vec![WATCH_URL]);
    assert_eq!(d.renderer().fetches.count(VIDEO_URL), 1);
}

#[tokio::test]
async fn video_success_includes_transcript() {
    let fetcher = MockFetcher::new()
        .with_body(WATCH_URL, WATCH_PAGE)
        .with_body(
            TRANSCRIPT_URL,
            r#"{"success":true,"transcript":"We're no strangers to love"}"#,
        );
    let d = dispatcher(
        MockRenderer::new().opened(),
        fetcher,
        CapabilityRegistry::all_available(),
    );

    let result = d.extract(VIDEO_URL).await;

    assert!(!result.is_degraded());
    assert!(result.content.starts_with("Title: Never Gonna\nChannel: Rick\n"));
    assert!(result.content.ends_with("Transcript:\nWe're no strangers to love"));
    assert_eq!(result.metadata["video_id"], "dQw4w9WgXcQ");
    assert_eq!(result.metadata["transcript_available"], true);
    assert!(result.media_urls.contains(VIDEO_URL));
    assert!(d.renderer().fetches.is_empty());
}

#[tokio::test]
async fn document_and_webpage_failure_degrades() {
    let url = "https://files.example.org/missing.pdf";
    let d = dispatcher(
        MockRenderer::new().opened(),
        MockFetcher::new(),
        CapabilityRegistry::all_available(),
    );

    let result = d.extract(url).await;

    assert_eq!(result.content, FAILED_CONTENT);
    assert_eq!(result.metadata["url"], url);
    assert_eq!(result.metadata["error_kind"], "fetch_failure");
    assert!(result.links.is_empty());
    assert!(result.data.is_none());
    // both tiers were tried
    assert_eq!(d.fetcher().fetches.entries(), vec![url]);
    assert_eq!(d.renderer().fetches.entries(), vec![url]);
}

#[tokio::test]
async fn tabular_extraction_returns_rows() {
    let url = "https://data.example.org/scores.csv";
    let fetcher = MockFetcher::new().with_body(url, "name,score\nada,10\nlin,7\n");
    let d = dispatcher(
        MockRenderer::new().opened(),
        fetcher,
        CapabilityRegistry::all_available(),
    );

    let result = d.extract(url).await;

    assert_eq!(result.content, "name: ada, score: 10\nname: lin, score: 7");
    let rows = result.data.expect("tabular data");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["name"], "lin");
    assert_eq!(result.metadata["rows"], 2);
    assert_eq!(result.metadata["url"], url);
}

#[tokio::test]
async fn tabular_failure_does_not_retry_as_webpage() {
    let url = "https://data.example.org/gone.csv";
    let renderer = MockRenderer::new()
        .opened()
        .with_page(url, html_page("Gone", "never rendered", &[]));
    let d = dispatcher(renderer, MockFetcher::new(), CapabilityRegistry::all_available());

    let result = d.extract(url).await;

    assert!(result.is_degraded());
    assert_eq!(result.metadata["error_kind"], "fetch_failure");
    assert!(d.renderer().fetches.is_empty());
}

#[tokio::test]
async fn image_without_ocr_binary_degrades() {
    let url = "https://img.example.org/scan.png";
    let fetcher = MockFetcher::new().with_body(url, vec![0x89, b'P', b'N', b'G']);
    let capabilities = CapabilityRegistry::none_available().with_format(ContentFormat::Image, true);
    let d = dispatcher(MockRenderer::new().opened(), fetcher, capabilities);

    let result = d.extract(url).await;

    assert!(result.is_degraded());
    assert_eq!(result.metadata["error_kind"], "capability_unavailable");
}

#[tokio::test]
async fn invalid_url_degrades_without_io() {
    let d = dispatcher(
        MockRenderer::new().opened(),
        MockFetcher::new(),
        CapabilityRegistry::all_available(),
    );

    for url in ["", "not a url", "mailto:someone@example.org", "ftp://example.org/a.csv"] {
        let result = d.extract(url).await;
        assert_eq!(result.content, FAILED_CONTENT, "{url}");
        assert_eq!(result.metadata["error_kind"], "invalid_url", "{url}");
    }
    assert!(d.renderer().fetches.is_empty());
    assert!(d.fetcher().fetches.is_empty());
}

#[tokio::test]
async fn unopened_renderer_degrades_webpages() {
    let url = "https://example.org/";
    let d = dispatcher(
        MockRenderer::new().with_page(url, html_page("Home", "hello", &[])),
        MockFetcher::new(),
        CapabilityRegistry::all_available(),
    );

    let result = d.extract(url).await;

    assert_eq!(result.error(), Some("Browser not initialized"));
    assert_eq!(result.metadata["error_kind"], "browser_failure");
}

#[tokio::test]
async fn webpage_links_are_absolute() {
    let url = "https://example.org/docs/";
    let renderer = MockRenderer::new().opened().with_page(
        url,
        html_page("Docs", "Index", &["intro", "/about", "https://other.org/x#top"]),
    );
    let d = dispatcher(renderer, MockFetcher::new(), CapabilityRegistry::all_available());

    let result = d.extract(url).await;

    let links: Vec<&str> = result.links.iter().map(String::as_str).collect();
    assert_eq!(
        links,
        vec![
            "https://example.org/docs/intro",
            "https://example.org/about",
            "https://other.org/x#top",
        ]
    );
}

#[tokio::test]
async fn lazy_extraction_skips_browser_for_fetched_formats() {
    let url = "https://data.example.org/scores.csv";
    let fetcher = MockFetcher::new().with_body(url, "name,score\nada,10\n");
    let mut d = dispatcher(MockRenderer::new(), fetcher, CapabilityRegistry::all_available());

    let result = d.extract_lazily(url).await;
    d.close().await;

    assert!(result.data.is_some());
    assert_eq!(d.renderer().lifecycle.entries(), vec!["close"]);
    assert!(d.renderer().fetches.is_empty());
}

#[tokio::test]
async fn lazy_extraction_opens_browser_for_webpage_fallback() {
    let renderer = MockRenderer::new()
        .with_page(VIDEO_URL, html_page("Video page", "Rendered description", &[]));
    let mut d = dispatcher(renderer, MockFetcher::new(), CapabilityRegistry::all_available());

    let first = d.extract_lazily(VIDEO_URL).await;
    let second = d.extract_lazily(VIDEO_URL).await;

    assert_eq!(first.content, "Rendered description");
    assert_eq!(second.content, "Rendered description");
    assert_eq!(d.renderer().lifecycle.entries(), vec!["open"]);
}

#[tokio::test]
async fn lazy_extraction_degrades_when_launch_fails() {
    let url = "https://example.org/";
    let renderer = MockRenderer::new()
        .failing_open()
        .with_page(url, html_page("Home", "hello", &[]));
    let mut d = dispatcher(renderer, MockFetcher::new(), CapabilityRegistry::all_available());

    let result = d.extract_lazily(url).await;

    assert_eq!(result.metadata["error_kind"], "browser_failure");
    assert_eq!(d.renderer().lifecycle.entries(), vec!["open"]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn extract_always_returns_a_result(input in ".{0,60}") {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let d = dispatcher(
            MockRenderer::new().opened(),
            MockFetcher::new(),
            CapabilityRegistry::all_available(),
        );

        let result = runtime.block_on(d.extract(&input));

        prop_assert!(!result.content.is_empty());
        if result.is_degraded() {
            prop_assert_eq!(result.content.as_str(), FAILED_CONTENT);
            prop_assert!(result.metadata.contains_key("url"));
        }
    }
}
