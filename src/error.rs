//! Error types for xhs-scrape
//!
//! Only two kinds of failure ever leave the core: the input held no
//! recognizable note link, or the page could not be fetched. Everything that
//! goes wrong inside extraction is absorbed and shows up as empty fields.

use http::StatusCode;
use thiserror::Error;

/// The main error type for xhs-scrape operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input text contains no valid Xiaohongshu link
    #[error("No valid Xiaohongshu link recognized in input")]
    Unrecognized,

    /// Page fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Page fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// The recognized URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request timed out
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("HTTP error {status}: {message}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Response body could not be read as text
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// The HTTP client could not be constructed
    #[error("Invalid client configuration: {0}")]
    Client(String),
}

/// Result type alias for xhs-scrape operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a generic error from a string
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Error::Generic(msg.into())
    }

    /// HTTP status the network wrapper answers with for this error.
    ///
    /// A missing link is the caller's fault; anything else is ours.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unrecognized => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error is a recognition failure
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Error::Unrecognized)
    }
}
