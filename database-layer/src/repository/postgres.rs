//! PostgreSQL-backed member and workout session repositories
//!
//! Session writes check the referenced member inside the same transaction,
//! holding a `FOR SHARE` lock on the member row so a concurrent delete cannot
//! slip in between the check and the write. The outcome is reported as
//! `MemberNotFound` rather than as a raw constraint violation.

use crate::{
    error::{DatabaseError, DatabaseResult, MemberLookup},
    models::{Member, NewMember, NewWorkoutSession, WorkoutSession},
    repository::{MemberRepository, SessionRepository},
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info};

const MEMBER_COLUMNS: &str = "id, name, age";
const SESSION_COLUMNS: &str = "session_id, member_id, session_date, session_time, activity";

/// PostgreSQL-backed member repository
#[derive(Debug, Clone)]
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn create(&self, member: NewMember) -> DatabaseResult<Member> {
        let created = sqlx::query_as::<_, Member>(&format!(
            "INSERT INTO members (name, age) VALUES ($1, $2) RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(&member.name)
        .bind(member.age)
        .fetch_one(&self.pool)
        .await?;

        info!(member_id = created.id, "Member created");
        Ok(created)
    }

    async fn update(&self, id: i32, member: NewMember) -> DatabaseResult<Member> {
        let updated = sqlx::query_as::<_, Member>(&format!(
            "UPDATE members SET name = $2, age = $3 WHERE id = $1 RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(id)
        .bind(&member.name)
        .bind(member.age)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatabaseError::MemberNotFound(MemberLookup::Id(id)))?;

        info!(member_id = id, "Member updated");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> DatabaseResult<()> {
        // workout_sessions.member_id is ON DELETE CASCADE
        let rows_affected = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(DatabaseError::MemberNotFound(MemberLookup::Id(id)));
        }

        info!(member_id = id, "Member deleted");
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> DatabaseResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn get_by_name(&self, name: &str) -> DatabaseResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE name = $1 ORDER BY id ASC LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn list_all(&self) -> DatabaseResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}

/// PostgreSQL-backed workout session repository
#[derive(Debug, Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the member row for the rest of the transaction, or report it missing
    async fn lock_member(tx: &mut Transaction<'_, Postgres>, member_id: i32) -> DatabaseResult<()> {
        let found: Option<i32> = sqlx::query_scalar("SELECT id FROM members WHERE id = $1 FOR SHARE")
            .bind(member_id)
            .fetch_optional(&mut **tx)
            .await?;

        found
            .map(|_| ())
            .ok_or(DatabaseError::MemberNotFound(MemberLookup::Id(member_id)))
    }
}

/// A foreign key violation on a session write means the member vanished
fn map_session_write_error(err: sqlx::Error, member_id: i32) -> DatabaseError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return DatabaseError::MemberNotFound(MemberLookup::Id(member_id));
        }
    }
    DatabaseError::SqlxError(err)
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, session: NewWorkoutSession) -> DatabaseResult<WorkoutSession> {
        debug!(member_id = session.member_id, "Creating workout session");
        let mut tx = self.pool.begin().await?;

        Self::lock_member(&mut tx, session.member_id).await?;

        let created = sqlx::query_as::<_, WorkoutSession>(&format!(
            "INSERT INTO workout_sessions (member_id, session_date, session_time, activity) \
             VALUES ($1, $2, $3, $4) RETURNING {SESSION_COLUMNS}"
        ))
        .bind(session.member_id)
        .bind(session.session_date)
        .bind(&session.session_time)
        .bind(&session.activity)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_session_write_error(e, session.member_id))?;

        tx.commit().await?;

        info!(session_id = created.session_id, member_id = created.member_id, "Workout session created");
        Ok(created)
    }

    async fn update(
        &self,
        session_id: i32,
        session: NewWorkoutSession,
    ) -> DatabaseResult<WorkoutSession> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT session_id FROM workout_sessions WHERE session_id = $1 FOR UPDATE",
        )
        .bind(session_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_none() {
            return Err(DatabaseError::SessionNotFound(session_id));
        }

        Self::lock_member(&mut tx, session.member_id).await?;

        let updated = sqlx::query_as::<_, WorkoutSession>(&format!(
            "UPDATE workout_sessions \
             SET member_id = $2, session_date = $3, session_time = $4, activity = $5 \
             WHERE session_id = $1 RETURNING {SESSION_COLUMNS}"
        ))
        .bind(session_id)
        .bind(session.member_id)
        .bind(session.session_date)
        .bind(&session.session_time)
        .bind(&session.activity)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_session_write_error(e, session.member_id))?;

        tx.commit().await?;

        info!(session_id, "Workout session updated");
        Ok(updated)
    }

    async fn delete(&self, session_id: i32) -> DatabaseResult<()> {
        let rows_affected = sqlx::query("DELETE FROM workout_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(DatabaseError::SessionNotFound(session_id));
        }

        info!(session_id, "Workout session deleted");
        Ok(())
    }

    async fn get_by_id(&self, session_id: i32) -> DatabaseResult<Option<WorkoutSession>> {
        let session = sqlx::query_as::<_, WorkoutSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM workout_sessions WHERE session_id = $1"
        ))
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn list_all(&self) -> DatabaseResult<Vec<WorkoutSession>> {
        let sessions = sqlx::query_as::<_, WorkoutSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM workout_sessions ORDER BY session_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    async fn list_by_member_name(&self, name: &str) -> DatabaseResult<Vec<WorkoutSession>> {
        let member_id: Option<i32> =
            sqlx::query_scalar("SELECT id FROM members WHERE name = $1 ORDER BY id ASC LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        let member_id =
            member_id.ok_or_else(|| DatabaseError::MemberNotFound(MemberLookup::Name(name.to_string())))?;

        let sessions = sqlx::query_as::<_, WorkoutSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM workout_sessions WHERE member_id = $1 ORDER BY session_id ASC"
        ))
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }
}
