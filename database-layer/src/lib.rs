//! Persistence layer for the Fitness Center API
//!
//! Two entities are stored: members and their workout sessions. Access goes
//! through the [`MemberRepository`] and [`SessionRepository`] traits so the
//! HTTP layer never sees SQL and tests can run without a database.
//!
//! # Key Features
//!
//! - **Explicit outcomes**: lookups return `Option`, writes against a missing
//!   row return `MemberNotFound` / `SessionNotFound`
//! - **Referential integrity**: session writes require an existing member;
//!   deleting a member deletes its sessions
//! - **Two backends**: PostgreSQL via `sqlx`, and an in-memory store with the
//!   same semantics
//! - **Connection management**: pooled connections built from settings whose
//!   password never leaves a `SecretString` except to connect
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use database_layer::{
//!     ensure_schema, DatabasePool, DatabaseSettings, MemberRepository, NewMember,
//!     PostgresMemberRepository,
//! };
//!
//! # async fn run() -> Result<(), database_layer::DatabaseError> {
//! let pool = DatabasePool::connect(&DatabaseSettings::default()).await?;
//! ensure_schema(pool.pool()).await?;
//!
//! let members = PostgresMemberRepository::new(pool.pool().clone());
//! let alice = members
//!     .create(NewMember { name: "Alice".to_string(), age: 30 })
//!     .await?;
//! assert!(members.get_by_id(alice.id).await?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod models;
pub mod repository;
pub mod schema;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use repository::*;
pub use schema::*;
