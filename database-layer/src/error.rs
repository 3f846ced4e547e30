use std::fmt;

use error_common::codes;
use thiserror::Error;

/// How a missing member was looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberLookup {
    Id(i32),
    Name(String),
}

impl fmt::Display for MemberLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberLookup::Id(id) => write!(f, "id {id}"),
            MemberLookup::Name(name) => write!(f, "name '{name}'"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Member not found ({0})")]
    MemberNotFound(MemberLookup),

    #[error("Workout session not found (id {0})")]
    SessionNotFound(i32),

    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl DatabaseError {
    /// True for the business-level "entity absent" outcomes
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DatabaseError::MemberNotFound(_) | DatabaseError::SessionNotFound(_)
        )
    }

    /// Stable error code reported to API clients
    pub fn error_code(&self) -> &'static str {
        match self {
            DatabaseError::MemberNotFound(_) | DatabaseError::SessionNotFound(_) => {
                codes::resource::NOT_FOUND
            }
            DatabaseError::ConnectionFailed(_) | DatabaseError::ConfigurationError(_) => {
                codes::database::CONNECTION_FAILED
            }
            DatabaseError::SqlxError(sqlx::Error::Database(db_err))
                if db_err.is_foreign_key_violation() || db_err.is_check_violation() =>
            {
                codes::database::CONSTRAINT_VIOLATION
            }
            DatabaseError::QueryFailed(_)
            | DatabaseError::SqlxError(_)
            | DatabaseError::InternalError(_) => codes::database::QUERY_FAILED,
        }
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_lookup_display() {
        let by_id = DatabaseError::MemberNotFound(MemberLookup::Id(7));
        assert_eq!(by_id.to_string(), "Member not found (id 7)");

        let by_name = DatabaseError::MemberNotFound(MemberLookup::Name("Alice".to_string()));
        assert_eq!(by_name.to_string(), "Member not found (name 'Alice')");
    }

    #[test]
    fn test_not_found_classification() {
        assert!(DatabaseError::SessionNotFound(3).is_not_found());
        assert!(!DatabaseError::QueryFailed("boom".to_string()).is_not_found());
        assert_eq!(
            DatabaseError::SessionNotFound(3).error_code(),
            codes::resource::NOT_FOUND
        );
        assert_eq!(
            DatabaseError::ConnectionFailed("refused".to_string()).error_code(),
            codes::database::CONNECTION_FAILED
        );
    }
}
