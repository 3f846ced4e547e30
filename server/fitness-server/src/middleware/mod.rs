//! Middleware for request processing

pub mod extractors;

pub use extractors::{IdPath, QueryParams, ValidatedJson};

use axum::{
    extract::Request,
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};

/// Requests slower than this are logged at `warn`
pub const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(1);

/// Audit logging middleware: method, path, status and latency of every request
pub async fn audit_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(ToString::to_string);

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed();
    let latency_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if elapsed > SLOW_REQUEST_THRESHOLD {
        tracing::warn!(
            method = %method,
            path = %path,
            status = %response.status().as_u16(),
            latency_ms,
            "Slow request detected"
        );
    } else {
        tracing::info!(
            method = %method,
            path = %path,
            status = %response.status().as_u16(),
            latency_ms,
            user_agent = ?user_agent,
            "API request audit"
        );
    }

    response
}

/// CORS for browser clients of the API
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}
