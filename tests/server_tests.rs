//! HTTP API tests
//!
//! Requests go through the full router with a stub page source, so no
//! network access is needed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use xhs_scrape::handlers::{AppState, ErrorResponse, StatusResponse};
use xhs_scrape::server::router;
use xhs_scrape::{FetchError, PageSource, RawDocument, ScrapeService};

const NOTE_PAGE: &str = r#"<html><head><title>Stub note - 小红书</title></head><body>
<script>window.__INITIAL_STATE__={"note":{"noteDetailMap":{"default":{"note":{"title":"State title","desc":"State body","imageList":[{"url_default":"https://sns-webpic.xhscdn.com/1.jpg"}]}}}}};(function(){})();</script>
</body></html>"#;

struct StubSource {
    fail: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl PageSource for StubSource {
    async fn fetch(&self, _url: &str) -> Result<RawDocument, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(FetchError::HttpStatus {
                status: 404,
                message: "Not Found".to_string(),
            })
        } else {
            Ok(RawDocument::new(NOTE_PAGE))
        }
    }
}

fn app(fail: bool) -> (Router, Arc<StubSource>, Arc<AppState>) {
    let source = Arc::new(StubSource {
        fail,
        calls: AtomicUsize::new(0),
    });
    let state = Arc::new(AppState::new(ScrapeService::new(source.clone())));
    (router(state.clone(), false), source, state)
}

fn scrape_request(uri: &str, input: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "input_text": input }).to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_scrape_returns_extraction_result() {
    let (app, source, _) = app(false);
    let response = app
        .oneshot(scrape_request(
            "/scrape",
            "分享一篇笔记 https://xhslink.com/a/xyz 复制后打开",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "title": "State title",
            "body": "State body",
            "image_urls": ["https://sns-webpic.xhscdn.com/1.jpg"]
        })
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_scrape_trailing_slash_route() {
    let (app, _, _) = app(false);
    let response = app
        .oneshot(scrape_request(
            "/scrape/",
            "https://www.xiaohongshu.com/explore/64f0c1a2",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unrecognized_input_is_client_error() {
    let (app, source, state) = app(false);
    let response = app
        .oneshot(scrape_request("/scrape", "just some words"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert!(!body.detail.is_empty());
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    assert_eq!(state.counters().unrecognized, 1);
}

#[tokio::test]
async fn test_fetch_failure_is_server_error() {
    let (app, source, state) = app(true);
    let response = app
        .oneshot(scrape_request(
            "/scrape",
            "https://www.xiaohongshu.com/explore/64f0c1a2",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert!(!body.detail.is_empty());
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(state.counters().fetch_failed, 1);
    assert_eq!(state.counters().succeeded, 0);
}

fn raw_scrape_request(content_type: Option<&str>, body: &'static str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/scrape");
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body)).unwrap()
}

#[tokio::test]
async fn test_bad_request_bodies_use_detail_shape() {
    let cases = [
        (Some("application/json"), r#"{"text":"x"}"#, StatusCode::UNPROCESSABLE_ENTITY),
        (Some("application/json"), "{not json", StatusCode::BAD_REQUEST),
        (None, r#"{"input_text":"x"}"#, StatusCode::UNSUPPORTED_MEDIA_TYPE),
    ];

    for (content_type, body, expected) in cases {
        let (app, source, state) = app(false);
        let response = app
            .oneshot(raw_scrape_request(content_type, body))
            .await
            .unwrap();

        assert_eq!(response.status(), expected, "body: {body}");
        let body: ErrorResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert!(!body.detail.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(state.counters(), Default::default());
    }
}

#[tokio::test]
async fn test_root_describes_service() {
    let (app, _, _) = app(false);
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "xhs-scrape");
    assert!(body["endpoints"]["/scrape"].is_string());
}

#[tokio::test]
async fn test_health_and_status() {
    let (app, _, _) = app(false);

    let response = app
        .clone()
        .oneshot(scrape_request(
            "/scrape",
            "https://www.xiaohongshu.com/explore/64f0c1a2",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "healthy"}));

    let response = app
        .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let status: StatusResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(status.status, "running");
    assert_eq!(status.scrapes.succeeded, 1);
    assert_eq!(status.latency.total_requests, 1);
}

#[tokio::test]
async fn test_concurrent_requests_are_isolated() {
    let (app, source, state) = app(false);

    let requests = (0..8).map(|i| {
        let app = app.clone();
        tokio::spawn(async move {
            let input = format!("https://www.xiaohongshu.com/explore/note{i}");
            let response = app.oneshot(scrape_request("/scrape", &input)).await.unwrap();
            body_json(response).await
        })
    });

    for handle in requests.collect::<Vec<_>>() {
        let body = handle.await.unwrap();
        assert_eq!(body["title"], "State title");
    }
    assert_eq!(source.calls.load(Ordering::SeqCst), 8);
    assert_eq!(state.counters().succeeded, 8);
}
