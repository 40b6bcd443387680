//! Note extraction module
//!
//! This module turns a fetched note page into title, body and image URLs,
//! trying the embedded hydration state first and markup fallbacks after it.

pub mod document;
pub mod fallback;
pub mod pipeline;
pub mod structured;

pub use document::{ParsedDocument, RawDocument};
pub use pipeline::{ExtractOptions, ExtractionResult, NoteExtractor};
pub use structured::StructuredNote;
