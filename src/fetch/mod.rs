//! Page fetching module
//!
//! This module issues the single GET request that turns a recognized link
//! into raw markup, using an explicit, immutable client configuration.

pub mod client;
pub mod config;

pub use client::{PageFetcher, PageSource};
pub use config::{FetcherConfig, FetcherConfigBuilder};
