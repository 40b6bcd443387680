//! CORS configuration for the scrape API
//!
//! By default only browser pages served from the local machine may call the
//! API. `--permissive-cors` opens it to any origin for deployments behind
//! another gateway.

use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::Method;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use url::{Host, Url};

/// Headers a browser may send to the API
pub const ALLOWED_HEADERS: [HeaderName; 1] = [CONTENT_TYPE];

/// Methods the API answers
pub const ALLOWED_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::OPTIONS];

/// Preflight cache lifetime (1 hour)
pub const DEFAULT_MAX_AGE_SECS: u64 = 3600;

/// CORS layer admitting only loopback origins
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin, _| {
            is_localhost_origin(origin)
        }))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(ALLOWED_HEADERS)
        .max_age(Duration::from_secs(DEFAULT_MAX_AGE_SECS))
}

/// CORS layer admitting any origin
pub fn cors_layer_permissive() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(Any)
        .max_age(Duration::from_secs(DEFAULT_MAX_AGE_SECS))
}

/// Pick the layer for the server's `permissive` setting
pub fn cors_layer_for(permissive: bool) -> CorsLayer {
    if permissive {
        cors_layer_permissive()
    } else {
        cors_layer()
    }
}

/// Whether `origin` is an http(s) origin on `localhost`, `127.0.0.1` or `[::1]`.
///
/// ```rust
/// use http::header::HeaderValue;
/// use xhs_scrape::cors::is_localhost_origin;
///
/// assert!(is_localhost_origin(&HeaderValue::from_static("http://localhost:3000")));
/// assert!(!is_localhost_origin(&HeaderValue::from_static("http://localhost.evil.com")));
/// ```
pub fn is_localhost_origin(origin: &HeaderValue) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    let Ok(url) = Url::parse(origin) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
