//! URL manipulation utilities.
//!
//! Link resolution and admission helpers shared by the webpage extractor,
//! the document extractor and the crawl engine.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static TEXT_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[^\s]+").expect("BUG: hardcoded TEXT_URL_RE regex is invalid")
});

/// Check if a URL is crawlable (http or https)
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Resolve an `href` against the page it was found on.
///
/// Fragment-only hrefs (`#section`) and anything that does not parse are
/// rejected.
#[must_use]
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    base.join(href).ok().map(String::from)
}

/// Whether the URL's host contains any of the allowed domain substrings.
///
/// URLs without a parsable host never match.
#[must_use]
pub fn host_matches_any(url: &str, allowed_domains: &[String]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    allowed_domains
        .iter()
        .any(|domain| host.contains(domain.as_str()))
}

/// Pull `http(s)://` URLs out of free text, in order of appearance, without duplicates
#[must_use]
pub fn extract_urls_from_text(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    TEXT_URL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_parent_relative_link() {
        let base = Url::parse("https://a.com/dir/page").unwrap();
        assert_eq!(
            resolve_link(&base, "../x"),
            Some("https://a.com/x".to_string())
        );
        assert_eq!(
            resolve_link(&base, "sibling"),
            Some("https://a.com/dir/sibling".to_string())
        );
    }

    #[test]
    fn test_fragment_only_href_is_rejected() {
        let base = Url::parse("https://a.com/dir/page").unwrap();
        assert_eq!(resolve_link(&base, "#section"), None);
        assert_eq!(resolve_link(&base, "   "), None);
    }

    #[test]
    fn test_unparsable_href_is_rejected() {
        let base = Url::parse("https://a.com/").unwrap();
        assert_eq!(resolve_link(&base, "http://[::1"), None);
    }

    #[test]
    fn test_host_substring_match() {
        let allowed = vec!["a.com".to_string()];
        assert!(host_matches_any("https://docs.a.com/page", &allowed));
        assert!(!host_matches_any("https://b.com/page", &allowed));
        assert!(!host_matches_any("mailto:someone@a.com", &allowed));
        assert!(!host_matches_any("not a url", &allowed));
    }

    #[test]
    fn test_is_valid_url_rejects_non_http() {
        assert!(is_valid_url("https://example.com"));
        assert!(!is_valid_url("mailto:a@b.c"));
        assert!(!is_valid_url("ftp://example.com/file"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_extract_urls_from_text() {
        let text = "See https://a.com/x and http://b.org/y.\nAgain https://a.com/x";
        assert_eq!(
            extract_urls_from_text(text),
            vec!["https://a.com/x".to_string(), "http://b.org/y.".to_string()]
        );
    }
}
