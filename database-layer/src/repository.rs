use crate::error::{DatabaseError, DatabaseResult, MemberLookup};
use crate::models::{Member, NewMember, NewWorkoutSession, WorkoutSession};
use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

pub mod postgres;

pub use postgres::{PostgresMemberRepository, PostgresSessionRepository};

/// Repository interface for members
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a member and return it with its generated id
    async fn create(&self, member: NewMember) -> DatabaseResult<Member>;

    /// Replace name and age of an existing member
    async fn update(&self, id: i32, member: NewMember) -> DatabaseResult<Member>;

    /// Delete a member together with its workout sessions
    async fn delete(&self, id: i32) -> DatabaseResult<()>;

    async fn get_by_id(&self, id: i32) -> DatabaseResult<Option<Member>>;

    /// Names are not unique; the member with the lowest id wins
    async fn get_by_name(&self, name: &str) -> DatabaseResult<Option<Member>>;

    /// All members ordered by id
    async fn list_all(&self) -> DatabaseResult<Vec<Member>>;
}

/// Repository interface for workout sessions.
/// Writes fail with `MemberNotFound` when `member_id` does not resolve.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: NewWorkoutSession) -> DatabaseResult<WorkoutSession>;

    /// Checks the session first, then the referenced member
    async fn update(
        &self,
        session_id: i32,
        session: NewWorkoutSession,
    ) -> DatabaseResult<WorkoutSession>;

    async fn delete(&self, session_id: i32) -> DatabaseResult<()>;

    async fn get_by_id(&self, session_id: i32) -> DatabaseResult<Option<WorkoutSession>>;

    /// All sessions ordered by session id
    async fn list_all(&self) -> DatabaseResult<Vec<WorkoutSession>>;

    /// Sessions of the member resolved by name; empty when the member has none
    async fn list_by_member_name(&self, name: &str) -> DatabaseResult<Vec<WorkoutSession>>;
}

#[derive(Debug, Default)]
struct StoreState {
    members: BTreeMap<i32, Member>,
    sessions: BTreeMap<i32, WorkoutSession>,
    last_member_id: i32,
    last_session_id: i32,
}

impl StoreState {
    fn next_member_id(&mut self) -> DatabaseResult<i32> {
        self.last_member_id = self
            .last_member_id
            .checked_add(1)
            .ok_or_else(|| DatabaseError::InternalError(anyhow!("member id sequence exhausted")))?;
        Ok(self.last_member_id)
    }

    fn next_session_id(&mut self) -> DatabaseResult<i32> {
        self.last_session_id = self
            .last_session_id
            .checked_add(1)
            .ok_or_else(|| DatabaseError::InternalError(anyhow!("session id sequence exhausted")))?;
        Ok(self.last_session_id)
    }

    fn first_member_named(&self, name: &str) -> Option<&Member> {
        // BTreeMap iterates in id order
        self.members.values().find(|member| member.name == name)
    }

    fn require_member(&self, member_id: i32) -> DatabaseResult<()> {
        if self.members.contains_key(&member_id) {
            Ok(())
        } else {
            Err(DatabaseError::MemberNotFound(MemberLookup::Id(member_id)))
        }
    }
}

/// In-memory store for testing and development.
///
/// Both repositories handed out by one store share the same state, so the
/// member check on session writes and the cascade on member deletion behave
/// like the PostgreSQL schema.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> InMemoryMemberRepository {
        InMemoryMemberRepository {
            state: Arc::clone(&self.state),
        }
    }

    pub fn sessions(&self) -> InMemorySessionRepository {
        InMemorySessionRepository {
            state: Arc::clone(&self.state),
        }
    }
}

/// Member view over an [`InMemoryStore`]
#[derive(Debug, Clone)]
pub struct InMemoryMemberRepository {
    state: Arc<RwLock<StoreState>>,
}

/// Session view over an [`InMemoryStore`]
#[derive(Debug, Clone)]
pub struct InMemorySessionRepository {
    state: Arc<RwLock<StoreState>>,
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn create(&self, member: NewMember) -> DatabaseResult<Member> {
        let mut state = self.state.write();
        let id = state.next_member_id()?;
        let member = member.into_member(id);
        state.members.insert(id, member.clone());
        Ok(member)
    }

    async fn update(&self, id: i32, member: NewMember) -> DatabaseResult<Member> {
        let mut state = self.state.write();
        let existing = state
            .members
            .get_mut(&id)
            .ok_or(DatabaseError::MemberNotFound(MemberLookup::Id(id)))?;
        *existing = member.into_member(id);
        Ok(existing.clone())
    }

    async fn delete(&self, id: i32) -> DatabaseResult<()> {
        let mut state = self.state.write();
        if state.members.remove(&id).is_none() {
            return Err(DatabaseError::MemberNotFound(MemberLookup::Id(id)));
        }
        state.sessions.retain(|_, session| session.member_id != id);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> DatabaseResult<Option<Member>> {
        Ok(self.state.read().members.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> DatabaseResult<Option<Member>> {
        Ok(self.state.read().first_member_named(name).cloned())
    }

    async fn list_all(&self) -> DatabaseResult<Vec<Member>> {
        Ok(self.state.read().members.values().cloned().collect())
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: NewWorkoutSession) -> DatabaseResult<WorkoutSession> {
        let mut state = self.state.write();
        state.require_member(session.member_id)?;
        let session_id = state.next_session_id()?;
        let session = session.into_session(session_id);
        state.sessions.insert(session_id, session.clone());
        Ok(session)
    }

    async fn update(
        &self,
        session_id: i32,
        session: NewWorkoutSession,
    ) -> DatabaseResult<WorkoutSession> {
        let mut state = self.state.write();
        if !state.sessions.contains_key(&session_id) {
            return Err(DatabaseError::SessionNotFound(session_id));
        }
        state.require_member(session.member_id)?;
        let session = session.into_session(session_id);
        state.sessions.insert(session_id, session.clone());
        Ok(session)
    }

    async fn delete(&self, session_id: i32) -> DatabaseResult<()> {
        self.state
            .write()
            .sessions
            .remove(&session_id)
            .map(|_| ())
            .ok_or(DatabaseError::SessionNotFound(session_id))
    }

    async fn get_by_id(&self, session_id: i32) -> DatabaseResult<Option<WorkoutSession>> {
        Ok(self.state.read().sessions.get(&session_id).cloned())
    }

    async fn list_all(&self) -> DatabaseResult<Vec<WorkoutSession>> {
        Ok(self.state.read().sessions.values().cloned().collect())
    }

    async fn list_by_member_name(&self, name: &str) -> DatabaseResult<Vec<WorkoutSession>> {
        let state = self.state.read();
        let member_id = state
            .first_member_named(name)
            .map(|member| member.id)
            .ok_or_else(|| DatabaseError::MemberNotFound(MemberLookup::Name(name.to_string())))?;

        Ok(state
            .sessions
            .values()
            .filter(|session| session.member_id == member_id)
            .cloned()
            .collect())
    }
}
