// Table bootstrap, run once at startup
use crate::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

/// Statements creating the two tables and their lookup indexes.
/// Deleting a member cascades to its workout sessions.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS members (
        id   SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        age  INTEGER NOT NULL CHECK (age >= 1)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS workout_sessions (
        session_id   SERIAL PRIMARY KEY,
        member_id    INTEGER NOT NULL REFERENCES members(id) ON DELETE CASCADE,
        session_date DATE NOT NULL,
        session_time VARCHAR(50) NOT NULL,
        activity     VARCHAR(255) NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_members_name ON members(name)",
    "CREATE INDEX IF NOT EXISTS idx_workout_sessions_member_id ON workout_sessions(member_id)",
];

/// Create any missing tables and indexes
pub async fn ensure_schema(pool: &PgPool) -> DatabaseResult<()> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DatabaseError::QueryFailed(format!("Failed to create schema: {e}")))?;
    }

    info!("Database schema is up to date");
    Ok(())
}
