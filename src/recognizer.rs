//! Note link recognition
//!
//! Finds the one URL worth fetching in free-form input. Share text copied out
//! of the app usually carries an `xhslink.com` short link somewhere inside it,
//! so that form is searched for anywhere. A canonical `xiaohongshu.com` note
//! URL is only accepted when it is the whole input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SHORT_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://xhslink\.com/\S+").expect("valid short link pattern"));

static CANONICAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?xiaohongshu\.com/(explore|discovery/item)/\S+$")
        .expect("valid canonical link pattern")
});

/// Which form of link was recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `xhslink.com` redirect link found inside the input
    ShortLink,
    /// The whole input is a `xiaohongshu.com` note URL
    Canonical,
}

/// A link recognized in user input, borrowed from that input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognizedLink<'a> {
    /// The URL to fetch
    pub url: &'a str,
    /// How it was recognized
    pub kind: LinkKind,
}

/// Link recognition over free-form text
pub struct LinkRecognizer;

impl LinkRecognizer {
    /// Recognize a note link in `text`.
    ///
    /// A short link anywhere in the input wins over everything else. Failing
    /// that, the input is returned unchanged if it is exactly a canonical
    /// note URL; surrounding whitespace or text disqualifies it.
    pub fn recognize(text: &str) -> Option<RecognizedLink<'_>> {
        if let Some(m) = SHORT_LINK_RE.find(text) {
            return Some(RecognizedLink {
                url: m.as_str(),
                kind: LinkKind::ShortLink,
            });
        }

        if CANONICAL_RE.is_match(text) {
            return Some(RecognizedLink {
                url: text,
                kind: LinkKind::Canonical,
            });
        }

        None
    }

    /// Recognize and return only the URL
    pub fn recognize_url(text: &str) -> Option<&str> {
        Self::recognize(text).map(|link| link.url)
    }
}
