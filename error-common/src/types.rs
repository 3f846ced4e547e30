use thiserror::Error;

/// Process-level error for the server binary and its bootstrap code
#[derive(Error, Debug)]
pub enum FitnessError {
    /// Network communication errors (bind, accept)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// HTTP server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Database bootstrap errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FitnessError {
    /// Short category name used as a structured logging field
    pub fn category(&self) -> &'static str {
        match self {
            FitnessError::NetworkError(_) => "network",
            FitnessError::ServerError(_) => "server",
            FitnessError::DatabaseError(_) => "database",
            FitnessError::ConfigError(_) => "config",
        }
    }
}

/// Result type alias for Fitness Center operations
pub type Result<T> = std::result::Result<T, FitnessError>;

/// Log an error with its category before it is returned to the caller
pub fn log_error(context: &str, error: &FitnessError) {
    tracing::error!(
        context = context,
        category = error.category(),
        error = %error,
        "Fitness Center error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category_prefix() {
        let err = FitnessError::ConfigError("missing database host".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing database host");
        assert_eq!(err.category(), "config");
    }
}
