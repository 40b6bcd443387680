//! HTTP handlers for the scrape API

pub mod scrape;
pub mod status;

pub use scrape::{root_handler, scrape_handler, ErrorResponse, ScrapeRequest};
pub use status::{status_routes, AppState, HealthResponse, StatusResponse};
