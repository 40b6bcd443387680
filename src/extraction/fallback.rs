//! Markup fallback tiers
//!
//! The same note is rendered into static tags for crawlers. These readers are
//! lossier than the hydration state but survive script format changes. Each
//! returns an empty value when it finds nothing.

use crate::extraction::document::ParsedDocument;
use once_cell::sync::Lazy;
use regex::Regex;

/// Suffix the site appends to every page title
pub const SITE_TITLE_SUFFIX: &str = " - 小红书";

/// Images at or below this many pixels on either side are treated as icons
const MIN_CONTENT_IMAGE_PX: i64 = 50;

static CONTENT_CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"desc|content|text").expect("valid content class pattern"));

/// `<title>` text, trimmed, with the site suffix removed
pub fn title_from_title_tag(document: &ParsedDocument) -> String {
    let Some(text) = document.title_text() else {
        return String::new();
    };

    let full = text.trim();
    match full.strip_suffix(SITE_TITLE_SUFFIX) {
        Some(stripped) => stripped.trim_end().to_string(),
        None => full.to_string(),
    }
}

/// `content` of the first `<meta name="description">`, trimmed
pub fn body_from_meta_description(document: &ParsedDocument) -> String {
    document
        .meta_tags("name", "description")
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

/// Open Graph images.
///
/// `name="og:image"` tags are used when any exist; only when there are none
/// at all are `property="og:image"` tags consulted.
pub fn images_from_open_graph(document: &ParsedDocument) -> Vec<String> {
    let mut tags = document.meta_tags("name", "og:image").peekable();
    let contents: Vec<&str> = if tags.peek().is_some() {
        tags.filter_map(|el| el.value().attr("content")).collect()
    } else {
        document
            .meta_tags("property", "og:image")
            .filter_map(|el| el.value().attr("content"))
            .collect()
    };

    dedup_non_empty(contents)
}

/// `href` of every `<link rel="preload" as="image">`
pub fn images_from_preload_links(document: &ParsedDocument) -> Vec<String> {
    dedup_non_empty(
        document
            .link_tags("preload", "image")
            .filter_map(|el| el.value().attr("href")),
    )
}

/// First `<h1>` text, trimmed
pub fn title_from_heading(document: &ParsedDocument) -> String {
    document
        .first_heading()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Text of the first `<div>` whose class looks like note content.
///
/// Text nodes are trimmed individually, blanks dropped, and joined by
/// newlines.
pub fn body_from_content_div(document: &ParsedDocument) -> String {
    document
        .divs_with_class(|class| CONTENT_CLASS_RE.is_match(class))
        .next()
        .map(|el| {
            el.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

/// Content-sized `<img>` sources
pub fn images_from_img_tags(document: &ParsedDocument) -> Vec<String> {
    dedup_non_empty(document.image_tags().filter_map(|el| {
        let attrs = el.value();
        let src = attrs
            .attr("src")
            .filter(|s| !s.is_empty())
            .or_else(|| attrs.attr("data-src"))?;

        if !(src.contains("xiaohongshu.com") || src.starts_with("http")) {
            return None;
        }

        let large_enough = [attrs.attr("width"), attrs.attr("height")]
            .into_iter()
            .flatten()
            .filter_map(|v| v.trim().parse::<i64>().ok())
            .all(|px| px > MIN_CONTENT_IMAGE_PX);

        large_enough.then_some(src)
    }))
}

fn dedup_non_empty<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}
