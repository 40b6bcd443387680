//! HTTP page fetcher
//!
//! One GET, no retries. Redirects (short link to canonical page) are
//! followed by the client, so callers only ever see the final document.

use crate::error::FetchError;
use crate::extraction::RawDocument;
use crate::fetch::config::FetcherConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::redirect::Policy;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Anything that can turn a URL into a raw document
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the document behind `url`
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError>;
}

/// reqwest-backed page fetcher
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    config: FetcherConfig,
}

impl PageFetcher {
    /// Build a fetcher from an explicit configuration
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&config.user_agent)?);
        headers.insert(ACCEPT, header_value(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&config.accept_language)?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the fetcher configuration
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch `url` and return its body as markup.
    ///
    /// Network errors, timeouts and any final status outside 2xx/3xx are
    /// reported as failures.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<RawDocument, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        let start = Instant::now();
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let final_url = response.url().to_string();
        debug!(%status, %final_url, "Received response");

        if !(status.is_success() || status.is_redirection()) {
            warn!(%status, "Fetch rejected by status");
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            });
        }

        let markup = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.config.timeout_ms)
            } else {
                FetchError::Body(e.to_string())
            }
        })?;

        info!(
            bytes = markup.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched page"
        );

        Ok(RawDocument::new(markup))
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.config.timeout_ms)
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        self.fetch_page(url).await
    }
}

fn header_value(value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|e| FetchError::Client(format!("bad header {value:?}: {e}")))
}
