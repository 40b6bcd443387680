//! Status and health check handlers for the scrape API.
//!
//! - `/health` and `/ready` - liveness/readiness probes
//! - `/status` - version, uptime, scrape counters, latency and memory
//!
//! # Example Response
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "name": "xhs-scrape",
//!   "uptime_seconds": 3600,
//!   "scrapes": { "succeeded": 120, "unrecognized": 4, "fetch_failed": 2 },
//!   "memory": { "rss_bytes": 52428800, "virtual_bytes": 268435456 },
//!   "latency": { "p50_ms": 410.5, "p95_ms": 980.2, "p99_ms": 1520.7, ... },
//!   "status": "running",
//!   "timestamp": "2026-01-01T12:00:00+00:00"
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use hdrhistogram::Histogram;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::{debug, instrument};

use crate::service::ScrapeService;

/// Server version from Cargo.toml
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name from Cargo.toml
pub const SERVER_NAME: &str = env!("CARGO_PKG_NAME");

/// Health check response for liveness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status (always "healthy" if responding)
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Detailed server status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server version (from Cargo.toml)
    pub version: String,

    /// Server name
    pub name: String,

    /// Server uptime in seconds
    pub uptime_seconds: u64,

    /// Scrape outcome counters
    pub scrapes: ScrapeCounters,

    /// Memory usage metrics
    pub memory: MemoryMetrics,

    /// Scrape latency statistics
    pub latency: LatencyMetrics,

    /// Server status (always "running" if responding)
    pub status: String,

    /// RFC 3339 timestamp of when status was generated
    pub timestamp: String,
}

/// Scrape outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeCounters {
    /// Scrapes that returned content
    pub succeeded: u64,
    /// Requests rejected because no link was recognized
    pub unrecognized: u64,
    /// Requests that failed while fetching the page
    pub fetch_failed: u64,
}

/// Memory usage metrics collected from sysinfo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryMetrics {
    /// Resident set size (bytes)
    pub rss_bytes: u64,

    /// Virtual memory size (bytes)
    pub virtual_bytes: u64,
}

/// Scrape latency percentile metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatencyMetrics {
    /// 50th percentile latency in milliseconds
    pub p50_ms: f64,

    /// 95th percentile latency in milliseconds
    pub p95_ms: f64,

    /// 99th percentile latency in milliseconds
    pub p99_ms: f64,

    /// Number of scrapes recorded
    pub total_requests: u64,

    /// Mean latency in milliseconds
    pub mean_ms: f64,

    /// Maximum latency recorded in milliseconds
    pub max_ms: f64,
}

/// Thread-safe latency histogram.
///
/// Tracks 1 microsecond to 60 seconds with 3 significant figures, which
/// covers the fetch timeout with room to spare.
#[derive(Debug)]
pub struct LatencyHistogram {
    inner: RwLock<Histogram<u64>>,
}

impl LatencyHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        let histogram =
            Histogram::new_with_bounds(1, 60_000_000, 3).expect("Failed to create histogram");
        Self {
            inner: RwLock::new(histogram),
        }
    }

    /// Record a latency in microseconds. Out-of-range values are dropped.
    pub fn record(&self, latency_us: u64) {
        let _ = self.inner.write().record(latency_us);
    }

    /// Record a latency duration.
    pub fn record_duration(&self, duration: Duration) {
        self.record(duration.as_micros() as u64);
    }

    /// Percentiles in milliseconds.
    pub fn metrics(&self) -> LatencyMetrics {
        let hist = self.inner.read();
        LatencyMetrics {
            p50_ms: hist.value_at_percentile(50.0) as f64 / 1000.0,
            p95_ms: hist.value_at_percentile(95.0) as f64 / 1000.0,
            p99_ms: hist.value_at_percentile(99.0) as f64 / 1000.0,
            total_requests: hist.len(),
            mean_ms: hist.mean() / 1000.0,
            max_ms: hist.max() as f64 / 1000.0,
        }
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state.
///
/// The scrape service itself is immutable; only the counters and the
/// histogram are written, all without blocking scrapes on each other.
pub struct AppState {
    service: ScrapeService,
    start_time: Instant,
    succeeded: AtomicU64,
    unrecognized: AtomicU64,
    fetch_failed: AtomicU64,
    latency_histogram: LatencyHistogram,
}

impl AppState {
    /// Create state around a scrape service.
    pub fn new(service: ScrapeService) -> Self {
        Self {
            service,
            start_time: Instant::now(),
            succeeded: AtomicU64::new(0),
            unrecognized: AtomicU64::new(0),
            fetch_failed: AtomicU64::new(0),
            latency_histogram: LatencyHistogram::new(),
        }
    }

    /// The scrape service.
    pub fn service(&self) -> &ScrapeService {
        &self.service
    }

    /// Server uptime in seconds.
    #[inline]
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Count a successful scrape and its latency.
    pub fn record_success(&self, elapsed: Duration) -> u64 {
        self.latency_histogram.record_duration(elapsed);
        self.succeeded.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Count a request with no recognizable link.
    pub fn record_unrecognized(&self) -> u64 {
        self.unrecognized.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Count a request whose fetch failed.
    pub fn record_fetch_failure(&self) -> u64 {
        self.fetch_failed.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Snapshot of the outcome counters.
    pub fn counters(&self) -> ScrapeCounters {
        ScrapeCounters {
            succeeded: self.succeeded.load(Ordering::Relaxed),
            unrecognized: self.unrecognized.load(Ordering::Relaxed),
            fetch_failed: self.fetch_failed.load(Ordering::Relaxed),
        }
    }

    /// Latency metrics of successful scrapes.
    pub fn latency_metrics(&self) -> LatencyMetrics {
        self.latency_histogram.metrics()
    }
}

/// Memory metrics for the current process; zeros if it cannot be found.
fn collect_memory_metrics() -> MemoryMetrics {
    let pid = Pid::from_u32(std::process::id());
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    match system.process(pid) {
        Some(process) => MemoryMetrics {
            rss_bytes: process.memory(),
            virtual_bytes: process.virtual_memory(),
        },
        None => {
            debug!("Could not find current process in sysinfo");
            MemoryMetrics::default()
        }
    }
}

/// `GET /health`
#[instrument(skip_all)]
pub async fn health_handler() -> impl IntoResponse {
    debug!("Health check requested");
    (StatusCode::OK, Json(HealthResponse::default()))
}

/// `GET /ready`
///
/// The service has no warm-up, so readiness equals liveness.
#[instrument(skip_all)]
pub async fn readiness_handler() -> impl IntoResponse {
    debug!("Readiness check requested");
    (StatusCode::OK, Json(HealthResponse::default()))
}

/// `GET /status`
#[instrument(skip_all)]
pub async fn status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Status check requested");

    let response = StatusResponse {
        version: SERVER_VERSION.to_string(),
        name: SERVER_NAME.to_string(),
        uptime_seconds: state.uptime_seconds(),
        scrapes: state.counters(),
        memory: collect_memory_metrics(),
        latency: state.latency_metrics(),
        status: "running".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}

/// Health and status routes.
pub fn status_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(readiness_handler))
        .route("/status", get(status_handler))
}
