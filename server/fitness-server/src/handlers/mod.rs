pub mod health;
pub mod members;
pub mod sessions;

use axum::http::Method;

use crate::error::ApiError;

/// Fallback for paths no route matches
pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route")
}

/// Fallback for known paths called with an unsupported method
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
    }
}
