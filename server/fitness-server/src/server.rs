use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use database_layer::{
    ensure_schema, DatabasePool, DatabaseResult, InMemoryStore, MemberRepository,
    PostgresMemberRepository, PostgresSessionRepository, SessionRepository, StorageBackend,
};
use tracing::info;

use crate::config::AppConfig;

/// Main Fitness Center server state, shared with every handler
#[derive(Clone)]
pub struct FitnessServer {
    /// Server configuration
    pub config: AppConfig,
    pub members: Arc<dyn MemberRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    /// Present only for the PostgreSQL backend
    pub db_pool: Option<DatabasePool>,
    started_at: Instant,
}

impl FitnessServer {
    /// Build the server for the backend named in `config.database.backend`
    pub async fn new(config: AppConfig) -> DatabaseResult<Self> {
        match config.database.backend {
            StorageBackend::Memory => Ok(Self::in_memory(config)),
            StorageBackend::Postgres => {
                let db_pool = DatabasePool::connect(&config.database).await?;
                ensure_schema(db_pool.pool()).await?;
                Ok(Self::with_pool(config, db_pool))
            }
        }
    }

    /// PostgreSQL repositories over an already connected pool
    pub fn with_pool(config: AppConfig, db_pool: DatabasePool) -> Self {
        let members = Arc::new(PostgresMemberRepository::new(db_pool.pool().clone()));
        let sessions = Arc::new(PostgresSessionRepository::new(db_pool.pool().clone()));

        info!(backend = "postgres", "Repositories initialized");
        Self::with_repositories(config, members, sessions, Some(db_pool))
    }

    /// Repositories over a fresh in-memory store; nothing survives a restart
    pub fn in_memory(config: AppConfig) -> Self {
        let store = InMemoryStore::new();

        info!(backend = "memory", "Repositories initialized");
        Self::with_repositories(
            config,
            Arc::new(store.members()),
            Arc::new(store.sessions()),
            None,
        )
    }

    pub fn with_repositories(
        config: AppConfig,
        members: Arc<dyn MemberRepository>,
        sessions: Arc<dyn SessionRepository>,
        db_pool: Option<DatabasePool>,
    ) -> Self {
        Self {
            config,
            members,
            sessions,
            db_pool,
            started_at: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Whether the backing store answers; the in-memory store always does
    pub async fn store_healthy(&self) -> bool {
        match &self.db_pool {
            Some(pool) => pool.is_healthy().await,
            None => true,
        }
    }

    /// Release store resources before exit
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.db_pool {
            pool.close().await;
        }
        info!("Fitness server shut down");
    }
}

impl fmt::Debug for FitnessServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FitnessServer")
            .field("config", &self.config)
            .field("db_pool", &self.db_pool)
            .finish_non_exhaustive()
    }
}
