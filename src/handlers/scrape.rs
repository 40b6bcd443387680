//! Scrape endpoint handlers
//!
//! `POST /scrape` takes `{"input_text": "..."}`, which may be a canonical note
//! URL or share text containing a short link, and answers with the extracted
//! note or a `{"detail": "..."}` error.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::error::Error;
use crate::handlers::status::{AppState, SERVER_NAME, SERVER_VERSION};

/// Detail returned when no link is recognized
pub const UNRECOGNIZED_DETAIL: &str = "无法从输入中识别有效的小红书链接";

/// Detail returned when the page cannot be fetched
pub const FETCH_FAILED_DETAIL: &str = "抓取内容失败";

/// Scrape request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Canonical note URL, or text containing a short link
    pub input_text: String,
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason
    pub detail: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let detail = match &self {
            Error::Unrecognized => UNRECOGNIZED_DETAIL,
            _ => FETCH_FAILED_DETAIL,
        };
        let body = ErrorResponse {
            detail: detail.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Body rejections keep axum's status but use the `{"detail": ...}` shape
fn rejection_response(rejection: JsonRejection) -> Response {
    let body = ErrorResponse {
        detail: rejection.body_text(),
    };
    (rejection.status(), Json(body)).into_response()
}

/// `POST /scrape`
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn scrape_handler(
    State(state): State<Arc<AppState>>,
    request: std::result::Result<Json<ScrapeRequest>, JsonRejection>,
) -> Response {
    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected scrape request body");
            return rejection_response(rejection);
        }
    };
    let start = Instant::now();

    match state.service().scrape(&request.input_text).await {
        Ok(outcome) => {
            let elapsed = start.elapsed();
            state.record_success(elapsed);
            info!(
                url = %outcome.url,
                elapsed_ms = elapsed.as_millis() as u64,
                "Scrape request served"
            );
            Json(outcome.content).into_response()
        }
        Err(err) => {
            if err.is_unrecognized() {
                state.record_unrecognized();
            } else {
                state.record_fetch_failure();
            }
            warn!(error = %err, "Scrape request failed");
            err.into_response()
        }
    }
}

/// `GET /`
#[instrument(skip_all)]
pub async fn root_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "小红书笔记内容抓取服务",
            "endpoints": {
                "/scrape": "POST {\"input_text\": ...} 抓取笔记标题、正文和图片链接"
            }
        })),
    )
}
