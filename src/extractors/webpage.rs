//! Generic webpage extraction
//!
//! Turns rendered HTML into plain text, outbound links, embedded media and
//! title/description metadata. This is the universal fallback for every
//! other format, so it never fails on well-formed input.

use ego_tree::iter::Edge;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::browser::PageRenderer;
use crate::error::ExtractResult;
use crate::schema::{ExtractionResult, NO_CONTENT};
use crate::utils::resolve_link;

/// Elements whose text never belongs in extracted content
const NOISE_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "template"];

/// Elements that break the text flow onto a new line
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

static MAIN_CONTENT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("article, main, .content, #content, .post, .article")
        .expect("BUG: hardcoded main content selector is invalid")
});

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("body").expect("BUG: hardcoded CSS selector 'body' is invalid")
});

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("BUG: hardcoded CSS selector 'title' is invalid")
});

static DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="description"]"#)
        .expect("BUG: hardcoded meta description selector is invalid")
});

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").expect("BUG: hardcoded CSS selector 'a[href]' is invalid")
});

static MEDIA_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("img[src], video[src], audio[src], source[src]")
        .expect("BUG: hardcoded media selector is invalid")
});

/// Render `url` and extract it
pub async fn extract<R: PageRenderer>(renderer: &R, url: &str) -> ExtractResult<ExtractionResult> {
    let html = renderer.fetch_rendered(url).await?;
    tracing::debug!(url, bytes = html.len(), "Rendered page");
    Ok(extract_from_html(&html, url))
}

/// Extract content, links, media and metadata from already rendered HTML
#[must_use]
pub fn extract_from_html(html: &str, url: &str) -> ExtractionResult {
    let document = Html::parse_document(html);

    let content = main_content_text(&document);
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default();
    let description = document
        .select(&DESCRIPTION_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut result = ExtractionResult::new(content)
        .with_metadata("title", title)
        .with_optional_metadata("description", description)
        .with_metadata("url", url);

    if let Ok(base) = Url::parse(url) {
        result.links = document
            .select(&LINK_SELECTOR)
            .filter_map(|el| el.value().attr("href"))
            .filter_map(|href| resolve_link(&base, href))
            .collect();
        result.media_urls = document
            .select(&MEDIA_SELECTOR)
            .filter_map(|el| el.value().attr("src"))
            .filter_map(|src| resolve_link(&base, src))
            .collect();
    } else {
        tracing::warn!(url, "Source URL does not parse, links not resolved");
    }

    result
}

/// Text of the first primary-content container, else the body, else the marker
fn main_content_text(document: &Html) -> String {
    let from_container = document
        .select(&MAIN_CONTENT_SELECTOR)
        .next()
        .map(visible_text)
        .filter(|text| !text.is_empty());

    from_container
        .or_else(|| {
            document
                .select(&BODY_SELECTOR)
                .next()
                .map(visible_text)
                .filter(|text| !text.is_empty())
        })
        .unwrap_or_else(|| NO_CONTENT.to_string())
}

/// Plain text of an element with noise subtrees skipped and whitespace normalized
fn visible_text(root: ElementRef<'_>) -> String {
    let mut raw = String::new();
    let mut skip_depth = 0usize;

    for edge in root.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(el) => {
                    if skip_depth > 0 || NOISE_TAGS.contains(&el.name()) {
                        skip_depth += 1;
                    } else if BLOCK_TAGS.contains(&el.name()) {
                        raw.push('\n');
                    }
                }
                Node::Text(text) if skip_depth == 0 => raw.push_str(text),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(el) = node.value() {
                    if skip_depth > 0 {
                        skip_depth -= 1;
                    } else if BLOCK_TAGS.contains(&el.name()) {
                        raw.push('\n');
                    }
                }
            }
        }
    }

    raw.lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
