//! Hydration state extraction
//!
//! Note pages ship the full note as a JSON object assigned to
//! `window.__INITIAL_STATE__` for client-side hydration. When it is present
//! and well formed it is the most complete source for all three fields.
//!
//! Decoding is all-or-nothing: the blob must parse and every key on the path
//! `note.noteDetailMap.default.note` must exist, otherwise this tier yields
//! nothing at all and each field falls back independently.

use crate::extraction::document::ParsedDocument;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

static STATE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)window\.__INITIAL_STATE__\s*=").expect("valid state marker pattern")
});

static STATE_BLOB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)window\.__INITIAL_STATE__\s*=\s*(\{.*?\});?\s*\(function")
        .expect("valid state blob pattern")
});

#[derive(Debug, Deserialize)]
struct InitialState {
    note: NoteState,
}

#[derive(Debug, Deserialize)]
struct NoteState {
    #[serde(rename = "noteDetailMap")]
    note_detail_map: NoteDetailMap,
}

#[derive(Debug, Deserialize)]
struct NoteDetailMap {
    default: NoteDetail,
}

#[derive(Debug, Deserialize)]
struct NoteDetail {
    note: NoteRecord,
}

#[derive(Debug, Deserialize)]
struct NoteRecord {
    title: Option<String>,
    desc: Option<String>,
    #[serde(rename = "imageList")]
    image_list: Option<Vec<Option<ImageEntry>>>,
}

#[derive(Debug, Deserialize)]
struct ImageEntry {
    url_default: Option<String>,
    url: Option<String>,
}

impl ImageEntry {
    fn best_url(self) -> Option<String> {
        self.url_default
            .filter(|u| !u.is_empty())
            .or(self.url)
            .filter(|u| !u.is_empty())
    }
}

/// Note content read from the hydration state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredNote {
    /// `note.title`, empty when absent
    pub title: String,
    /// `note.desc`, empty when absent
    pub body: String,
    /// Image URLs in list order, `url_default` preferred over `url`
    pub image_urls: Vec<String>,
}

impl From<NoteRecord> for StructuredNote {
    fn from(note: NoteRecord) -> Self {
        let image_urls = note
            .image_list
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(ImageEntry::best_url)
            .collect();

        Self {
            title: note.title.unwrap_or_default(),
            body: note.desc.unwrap_or_default(),
            image_urls,
        }
    }
}

/// Structured tier over a parsed document.
///
/// Only the first script carrying the state assignment is considered.
pub fn extract_structured(document: &ParsedDocument) -> Option<StructuredNote> {
    let script = document
        .script_texts()
        .find(|text| STATE_MARKER_RE.is_match(text));

    match script {
        Some(script) => decode_state_script(&script),
        None => {
            debug!("No hydration state script found");
            None
        }
    }
}

/// Decode the note out of a script body containing the state assignment
pub fn decode_state_script(script: &str) -> Option<StructuredNote> {
    let Some(captures) = STATE_BLOB_RE.captures(script) else {
        debug!("State assignment present but blob could not be delimited");
        return None;
    };

    match serde_json::from_str::<InitialState>(&captures[1]) {
        Ok(state) => Some(state.note.note_detail_map.default.note.into()),
        Err(e) => {
            debug!(error = %e, "Malformed hydration state, falling back to markup");
            None
        }
    }
}
