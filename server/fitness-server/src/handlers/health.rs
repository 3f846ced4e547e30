use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::FitnessServer;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
    /// API version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Uptime in seconds
    #[schema(example = 3600)]
    pub uptime: u64,
    /// Individual component checks
    pub checks: BTreeMap<String, String>,
}

/// Health check handler; 503 when the store does not answer
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse),
        (status = 503, description = "Store is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<FitnessServer>,
) -> (StatusCode, Json<HealthResponse>) {
    let store_healthy = server.store_healthy().await;
    let store_kind = if server.db_pool.is_some() { "postgres" } else { "memory" };

    let mut checks = BTreeMap::new();
    checks.insert(
        "store".to_string(),
        if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
    );
    checks.insert("backend".to_string(), store_kind.to_string());

    let (status_code, status) = if store_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    let response = HealthResponse {
        status: status.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: server.uptime().as_secs(),
        checks,
    };

    (status_code, Json(response))
}
