use kodegen_tools_urlextract::{ContentFormat, classify};
use proptest::prelude::*;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

proptest! {
    #[test]
    fn classify_is_total_and_deterministic(input in ".*") {
        let first = classify(&input);
        prop_assert!(ContentFormat::ALL.contains(&first));
        prop_assert_eq!(first, classify(&input));
    }

    #[test]
    fn video_host_beats_every_extension(
        path in "[a-z0-9]{1,12}",
        ext in prop::sample::select(vec!["pdf", "csv", "png", "html"]),
        short in any::<bool>(),
    ) {
        let host = if short { "youtu.be" } else { "www.youtube.com" };
        let url = format!("https://{host}/{path}.{ext}");
        prop_assert_eq!(classify(&url), ContentFormat::Video);
    }

    #[test]
    fn image_extensions_ignore_case(
        name in "[a-z]{1,10}",
        stem in "[a-z0-9_-]{1,12}",
        ext in prop::sample::select(IMAGE_EXTENSIONS.to_vec()),
        upper in any::<bool>(),
    ) {
        let ext = if upper { ext.to_ascii_uppercase() } else { ext.to_string() };
        let url = format!("https://{name}.example.org/assets/{stem}.{ext}");
        prop_assert_eq!(classify(&url), ContentFormat::Image);
    }

    #[test]
    fn query_strings_do_not_change_format(
        name in "[a-z]{1,10}",
        query in "[a-z0-9=&]{0,20}",
    ) {
        let url = format!("https://{name}.example.org/export.csv?{query}");
        prop_assert_eq!(classify(&url), ContentFormat::Tabular);
    }
}

#[test]
fn documented_rule_order() {
    let cases = [
        ("https://youtu.be/abc", ContentFormat::Video),
        ("https://x.com/f.pdf", ContentFormat::Document),
        ("https://x.com/f.csv", ContentFormat::Tabular),
        ("https://x.com/img.PNG", ContentFormat::Image),
        ("https://x.com/page", ContentFormat::Webpage),
    ];
    for (url, expected) in cases {
        assert_eq!(classify(url), expected, "{url}");
    }
}
