//! Recognize, fetch, extract
//!
//! The one sequence both front ends run. Each call is independent: nothing
//! is cached and nothing mutable is shared between calls.

use crate::error::{Error, Result};
use crate::extraction::{ExtractOptions, ExtractionResult, NoteExtractor};
use crate::fetch::{FetcherConfig, PageFetcher, PageSource};
use crate::recognizer::{LinkKind, LinkRecognizer};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Outcome of a successful scrape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOutcome {
    /// URL that was fetched, as recognized in the input
    pub url: String,
    /// How the URL was recognized
    pub kind: LinkKind,
    /// Extracted content
    pub content: ExtractionResult,
}

/// Scrape orchestration over a page source
#[derive(Clone)]
pub struct ScrapeService {
    source: Arc<dyn PageSource>,
    options: ExtractOptions,
}

impl ScrapeService {
    /// Create a service over any page source
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self {
            source,
            options: ExtractOptions::default(),
        }
    }

    /// Create a service fetching over HTTP with `config`
    pub fn with_fetcher_config(config: FetcherConfig) -> Result<Self> {
        let fetcher = PageFetcher::new(config)?;
        Ok(Self::new(Arc::new(fetcher)))
    }

    /// Set extraction options
    pub fn options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the extraction options
    pub fn extract_options(&self) -> ExtractOptions {
        self.options
    }

    /// Recognize a link in `input`, fetch it and extract the note.
    ///
    /// Fails with [`Error::Unrecognized`] before any network traffic when no
    /// link is found, and with [`Error::Fetch`] without extracting when the
    /// page cannot be fetched.
    #[instrument(skip(self, input))]
    pub async fn scrape(&self, input: &str) -> Result<ScrapeOutcome> {
        let Some(link) = LinkRecognizer::recognize(input) else {
            warn!(input_len = input.len(), "No note link recognized");
            return Err(Error::Unrecognized);
        };
        info!(url = link.url, kind = ?link.kind, "Recognized note link");

        let document = self.source.fetch(link.url).await.map_err(|e| {
            warn!(error = %e, "Fetch failed");
            Error::from(e)
        })?;

        let content = NoteExtractor::extract_with(&document, self.options);
        info!(
            has_title = !content.title.is_empty(),
            has_body = !content.body.is_empty(),
            images = content.image_urls.len(),
            "Scrape finished"
        );

        Ok(ScrapeOutcome {
            url: link.url.to_string(),
            kind: link.kind,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::extraction::RawDocument;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource {
        markup: Option<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageSource for StaticSource {
        async fn fetch(&self, _url: &str) -> std::result::Result<RawDocument, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.markup {
                Some(markup) => Ok(RawDocument::new(markup)),
                None => Err(FetchError::HttpStatus {
                    status: 404,
                    message: "Not Found".to_string(),
                }),
            }
        }
    }

    fn service(markup: Option<&'static str>) -> (ScrapeService, Arc<StaticSource>) {
        let source = Arc::new(StaticSource {
            markup,
            calls: AtomicUsize::new(0),
        });
        (ScrapeService::new(source.clone()), source)
    }

    #[tokio::test]
    async fn test_unrecognized_input_skips_fetch() {
        let (service, source) = service(Some("<title>x</title>"));
        let err = service.scrape("no link here").await.unwrap_err();
        assert!(err.is_unrecognized());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let (service, source) = service(None);
        let err = service
            .scrape("https://www.xiaohongshu.com/explore/abc")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::HttpStatus { status: 404, .. })));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_scrape_short_link() {
        let (service, _) = service(Some(
            r#"<title>Note - 小红书</title><meta name="description" content="Body">"#,
        ));
        let outcome = service
            .scrape("快来看 https://xhslink.com/a/xyz 复制")
            .await
            .unwrap();

        assert_eq!(outcome.url, "https://xhslink.com/a/xyz");
        assert_eq!(outcome.kind, LinkKind::ShortLink);
        assert_eq!(outcome.content.title, "Note");
        assert_eq!(outcome.content.body, "Body");
    }

    #[tokio::test]
    async fn test_extended_options_reach_extractor() {
        let (service, _) = service(Some("<body><h1>Heading</h1></body>"));
        let service = service.options(ExtractOptions::extended());
        assert!(service.extract_options().extended_fallbacks);

        let outcome = service
            .scrape("https://www.xiaohongshu.com/explore/abc")
            .await
            .unwrap();
        assert_eq!(outcome.content.title, "Heading");
    }
}
