pub mod paths;

use axum::{routing::get, Router};

use crate::{
    handlers::{health, members, sessions},
    server::FitnessServer,
};

/// Create health check routes
pub fn health_routes() -> Router<FitnessServer> {
    Router::new().route(paths::health::HEALTH, get(health::health_check))
}

/// Create member routes
pub fn member_routes() -> Router<FitnessServer> {
    Router::new()
        .route(
            paths::members::MEMBERS,
            get(members::list_members).post(members::create_member),
        )
        .route(
            paths::members::MEMBER_BY_ID,
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        .route(
            paths::members::SEARCH_BY_NAME,
            get(members::search_member_by_name),
        )
}

/// Create workout session routes
pub fn session_routes() -> Router<FitnessServer> {
    Router::new()
        .route(
            paths::sessions::WORKOUT_SESSIONS,
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route(
            paths::sessions::WORKOUT_SESSION_BY_ID,
            get(sessions::get_session)
                .put(sessions::update_session)
                .delete(sessions::delete_session),
        )
        .route(
            paths::sessions::BY_MEMBER,
            get(sessions::list_sessions_by_member),
        )
}

/// Create all application routes
pub fn create_routes() -> Router<FitnessServer> {
    Router::new()
        .merge(health_routes())
        .merge(member_routes())
        .merge(session_routes())
}
