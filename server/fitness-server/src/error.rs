use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use database_layer::DatabaseError;
use error_common::codes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Field name mapped to every message reported against it
pub type FieldErrorMap = BTreeMap<String, Vec<String>>;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Error type, e.g. `validation_error` or `not_found`
    pub error_type: String,
    /// Stable machine-readable code
    #[schema(example = "VALIDATION_1001")]
    pub error_code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-specific validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrorMap>,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Body of a successful create or update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResourceResponse<T> {
    pub message: String,
    pub data: T,
}

/// Body of a successful delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Member successfully removed!")]
    pub message: String,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field_errors: Option<FieldErrorMap>,
    },

    #[error("{resource_type} not found")]
    NotFound { resource_type: String },

    #[error("Database error: {0}")]
    Database(DatabaseError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Method {method} not allowed")]
    MethodNotAllowed { method: String },
}

impl ApiError {
    /// Create a validation error with field-specific errors
    pub fn validation_with_fields(message: impl Into<String>, field_errors: FieldErrorMap) -> Self {
        Self::Validation {
            message: message.into(),
            field_errors: Some(field_errors),
        }
    }

    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Database(db_err) => match db_err {
                DatabaseError::MemberNotFound(_) | DatabaseError::SessionNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                DatabaseError::ConnectionFailed(_)
                | DatabaseError::ConfigurationError(_)
                | DatabaseError::SqlxError(
                    sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_),
                ) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Database(_) => "database_error",
            ApiError::BadRequest { .. } => "bad_request",
            ApiError::MethodNotAllowed { .. } => "method_not_allowed",
        }
    }

    /// Stable error code from `error_common::codes`
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => codes::validation::INVALID_INPUT,
            ApiError::BadRequest { .. } => codes::validation::MALFORMED_BODY,
            ApiError::NotFound { .. } => codes::resource::NOT_FOUND,
            ApiError::Database(db_err) => db_err.error_code(),
            ApiError::MethodNotAllowed { .. } => codes::routing::METHOD_NOT_ALLOWED,
        }
    }

    /// Client-facing text for store failures; driver details stay in the logs
    pub fn format_database_error(db_error: &DatabaseError) -> String {
        match db_error {
            DatabaseError::ConnectionFailed(_) => {
                "Unable to connect to the database. Try again in a few moments.".to_string()
            }
            DatabaseError::ConfigurationError(_) => "Database is not configured correctly.".to_string(),
            DatabaseError::MemberNotFound(_) => "Member not found".to_string(),
            DatabaseError::SessionNotFound(_) => "Workout session not found".to_string(),
            DatabaseError::SqlxError(sqlx::Error::Database(db_err)) => {
                if db_err.is_foreign_key_violation() {
                    "Referenced record does not exist or has been deleted.".to_string()
                } else if db_err.is_check_violation() {
                    "The provided data does not meet validation requirements.".to_string()
                } else {
                    "Database operation failed. Please try again.".to_string()
                }
            }
            DatabaseError::SqlxError(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
                "Database is busy or unavailable. Try again in a few moments.".to_string()
            }
            _ => "An unexpected database error occurred.".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                error = %self,
                "API error occurred"
            );
        } else {
            warn!(
                error_id = %error_id,
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                error = %self,
                "Request rejected"
            );
        }

        let message = match &self {
            ApiError::Database(db_err) => ApiError::format_database_error(db_err),
            _ => self.to_string(),
        };
        let error_type = self.error_type().to_string();
        let error_code = self.error_code().to_string();

        let field_errors = match self {
            ApiError::Validation { field_errors, .. } => field_errors,
            _ => None,
        };

        let error_response = ApiErrorResponse {
            error_id,
            error_type,
            error_code,
            message,
            field_errors,
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

/// Business not-found outcomes become 404s; everything else is a store failure
impl From<DatabaseError> for ApiError {
    fn from(db_error: DatabaseError) -> Self {
        match db_error {
            DatabaseError::MemberNotFound(_) => ApiError::not_found("Member"),
            DatabaseError::SessionNotFound(_) => ApiError::not_found("Workout session"),
            other => ApiError::Database(other),
        }
    }
}

/// Convert serde JSON errors to API errors
impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::BadRequest {
            message: format!("Invalid JSON: {error}"),
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
