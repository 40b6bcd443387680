//! Layered note extraction
//!
//! Each field walks its own tier list and stops at the first tier that gives
//! a non-empty value. Tiers never merge: a field's value always comes from
//! exactly one tier.
//!
//! ```text
//!            title              body                 image_urls
//!   1  hydration state    hydration state      hydration state
//!   2  <title>            meta description     og:image meta
//!   3  (<h1>)             (content <div>)      preload links
//!   4                                          (<img> tags)
//! ```
//!
//! Parenthesised tiers only run with [`ExtractOptions::extended_fallbacks`].

use crate::extraction::document::RawDocument;
use crate::extraction::{fallback, structured};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Extracted note content.
///
/// Fields are empty when nothing was found; emptiness is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Note title
    pub title: String,
    /// Note body text
    pub body: String,
    /// Image URLs, never containing an empty entry
    pub image_urls: Vec<String>,
}

impl ExtractionResult {
    /// Whether every field came back empty
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty() && self.image_urls.is_empty()
    }
}

/// Extraction knobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Also try heading, content-div and `<img>` heuristics as last resorts
    pub extended_fallbacks: bool,
}

impl ExtractOptions {
    /// Options with the extended heuristics enabled
    pub fn extended() -> Self {
        Self {
            extended_fallbacks: true,
        }
    }
}

trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for Vec<String> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Run `tier` only if `value` is still blank
fn fall_back<T: Blank>(
    value: &mut T,
    field: &str,
    tier: &str,
    enabled: bool,
    run: impl FnOnce() -> T,
) {
    if !enabled || !value.is_blank() {
        return;
    }
    *value = run();
    if !value.is_blank() {
        debug!(field, tier, "Field filled");
    }
}

/// Note extraction pipeline
pub struct NoteExtractor;

impl NoteExtractor {
    /// Extract with the default tiers
    pub fn extract(document: &RawDocument) -> ExtractionResult {
        Self::extract_with(document, ExtractOptions::default())
    }

    /// Extract with explicit options.
    ///
    /// Pure function of its inputs; the same document always gives the same
    /// result.
    #[instrument(skip(document), fields(bytes = document.len()))]
    pub fn extract_with(document: &RawDocument, options: ExtractOptions) -> ExtractionResult {
        let parsed = document.parse();
        let extended = options.extended_fallbacks;

        let note = structured::extract_structured(&parsed).unwrap_or_default();
        if !note.title.is_empty() {
            debug!(field = "title", tier = "structured", "Field filled");
        }
        if !note.body.is_empty() {
            debug!(field = "body", tier = "structured", "Field filled");
        }
        if !note.image_urls.is_empty() {
            debug!(field = "image_urls", tier = "structured", "Field filled");
        }

        let mut title = note.title;
        fall_back(&mut title, "title", "title_tag", true, || {
            fallback::title_from_title_tag(&parsed)
        });
        fall_back(&mut title, "title", "heading", extended, || {
            fallback::title_from_heading(&parsed)
        });

        let mut body = note.body;
        fall_back(&mut body, "body", "meta_description", true, || {
            fallback::body_from_meta_description(&parsed)
        });
        fall_back(&mut body, "body", "content_div", extended, || {
            fallback::body_from_content_div(&parsed)
        });

        let mut image_urls = note.image_urls;
        fall_back(&mut image_urls, "image_urls", "open_graph", true, || {
            fallback::images_from_open_graph(&parsed)
        });
        fall_back(&mut image_urls, "image_urls", "preload_link", true, || {
            fallback::images_from_preload_links(&parsed)
        });
        fall_back(&mut image_urls, "image_urls", "img_tag", extended, || {
            fallback::images_from_img_tags(&parsed)
        });

        debug!(
            title_len = title.chars().count(),
            body_len = body.chars().count(),
            images = image_urls.len(),
            "Extraction finished"
        );

        ExtractionResult {
            title,
            body,
            image_urls,
        }
    }
}
