//! Fitness Center Server - members and workout sessions HTTP API
//!
//! This library builds the axum application: routes, request validation,
//! error responses and middleware. The binary in `main.rs` adds
//! configuration, logging and the listener.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod validation;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::*;
pub use server::FitnessServer;

use axum::{middleware::from_fn, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Create the main application router with all routes and middleware
pub fn create_app(server: FitnessServer) -> Router {
    let request_timeout = Duration::from_secs(server.config.server.request_timeout_secs);

    routes::create_routes()
        .merge(openapi::create_docs_routes())
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer())
                .layer(from_fn(middleware::audit_logging_middleware))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(server)
}
