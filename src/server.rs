//! HTTP server for the scrape API
//!
//! ```text
//! POST /scrape ──▶ scrape_handler ──▶ ScrapeService
//!                                        │
//!                      recognize ──▶ fetch ──▶ extract
//! ```
//!
//! Every request runs its own pipeline; the shared state only carries the
//! immutable service and some counters.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cors::cors_layer_for;
use crate::error::{Error, Result};
use crate::handlers::{root_handler, scrape_handler, status_routes, AppState};

/// Server bind and policy settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (default: 127.0.0.1)
    pub host: String,
    /// Port to listen on (default: 8000)
    pub port: u16,
    /// Accept cross-origin requests from anywhere
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            permissive_cors: false,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::generic(format!("invalid bind address: {e}")))
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>, permissive_cors: bool) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/scrape", post(scrape_handler))
        .route("/scrape/", post(scrape_handler))
        .merge(status_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer_for(permissive_cors))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: ServerConfig, state: Arc<AppState>) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::generic(format!("failed to bind {addr}: {e}")))?;
    info!("xhs-scrape API listening on http://{}", listener
        .local_addr()
        .map_err(|e| Error::generic(format!("failed to read local address: {e}")))?);

    axum::serve(listener, router(state, config.permissive_cors))
        .await
        .map_err(|e| Error::generic(format!("server error: {e}")))?;
    Ok(())
}
