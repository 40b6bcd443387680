//! xhs-scrape - Xiaohongshu note scraper
//!
//! Takes a note link (or share text containing a short link), fetches the
//! note page and extracts its title, body text and image URLs.
//!
//! # Architecture
//!
//! ```text
//! input text ──▶ LinkRecognizer ──▶ PageFetcher ──▶ NoteExtractor
//!                                                       │
//!                        ┌──────────────────────────────┤
//!                        ▼                              ▼
//!                 hydration state              markup fallbacks
//!              (window.__INITIAL_STATE__)   (<title>, meta, og:image,
//!                                             preload links, ...)
//! ```
//!
//! The same sequence backs the `xhs-scrape` command line and its HTTP API.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xhs_scrape::fetch::FetcherConfig;
//! use xhs_scrape::ScrapeService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = ScrapeService::with_fetcher_config(FetcherConfig::default())?;
//!     let outcome = service
//!         .scrape("https://www.xiaohongshu.com/explore/64f0c1a2000000001f03b7c1")
//!         .await?;
//!
//!     println!("{}", outcome.content.title);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cors;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod handlers;
pub mod recognizer;
pub mod server;
pub mod service;

// Re-exports for convenience
pub use error::{Error, FetchError, Result};
pub use extraction::{ExtractOptions, ExtractionResult, NoteExtractor, RawDocument};
pub use fetch::{FetcherConfig, PageFetcher, PageSource};
pub use recognizer::{LinkKind, LinkRecognizer, RecognizedLink};
pub use service::{ScrapeOutcome, ScrapeService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
