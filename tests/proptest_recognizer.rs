//! Property-based tests for link recognition and extraction.

use proptest::prelude::*;
use xhs_scrape::{ExtractOptions, LinkKind, LinkRecognizer, NoteExtractor, RawDocument};

/// Short link path tokens as the app generates them
fn arb_token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9/_-]{1,24}"
}

/// Share text surrounding a link; always ends in whitespace so the link
/// token is delimited
fn arb_share_prefix() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z 笔记分享小红书【】，！]{0,30} ".prop_map(|s| s),
    ]
}

fn arb_share_suffix() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        " [a-z 复制本条信息打开App，！]{0,30}".prop_map(|s| s),
    ]
}

fn arb_scheme() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("http"), Just("https")]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_short_link_found_anywhere(
        prefix in arb_share_prefix(),
        scheme in arb_scheme(),
        token in arb_token(),
        suffix in arb_share_suffix(),
    ) {
        let link = format!("{scheme}://xhslink.com/{token}");
        let text = format!("{prefix}{link}{suffix}");

        let recognized = LinkRecognizer::recognize(&text).unwrap();
        prop_assert_eq!(recognized.url, link.as_str());
        prop_assert_eq!(recognized.kind, LinkKind::ShortLink);
    }

    #[test]
    fn prop_canonical_only_as_whole_input(
        www in any::<bool>(),
        path in prop_oneof![Just("explore"), Just("discovery/item")],
        id in "[0-9a-f]{8,24}",
    ) {
        let host = if www { "www.xiaohongshu.com" } else { "xiaohongshu.com" };
        let url = format!("https://{host}/{path}/{id}");

        prop_assert_eq!(LinkRecognizer::recognize_url(&url), Some(url.as_str()));

        let padded = format!(" {url}");
        prop_assert!(LinkRecognizer::recognize(&padded).is_none());
    }

    #[test]
    fn prop_recognized_url_is_substring(text in ".{0,80}") {
        if let Some(url) = LinkRecognizer::recognize_url(&text) {
            prop_assert!(text.contains(url));
            prop_assert!(!url.chars().any(char::is_whitespace));
        }
    }

    #[test]
    fn prop_extraction_never_panics_and_is_pure(markup in ".{0,200}", extended in any::<bool>()) {
        let doc = RawDocument::new(markup);
        let options = ExtractOptions { extended_fallbacks: extended };

        let first = NoteExtractor::extract_with(&doc, options);
        let second = NoteExtractor::extract_with(&doc, options);
        prop_assert!(first.image_urls.iter().all(|u| !u.is_empty()));
        prop_assert_eq!(first, second);
    }
}
