//! Route path constants
//!
//! Runtime routes use these constants. utoipa `#[utoipa::path(...)]`
//! attributes need string literals in `{id}` form, so keep them in sync by
//! hand.

/// Health check endpoints
pub mod health {
    pub const HEALTH: &str = "/health";
}

/// Member endpoints
pub mod members {
    pub const MEMBERS: &str = "/members";
    pub const MEMBER_BY_ID: &str = "/member/:id";
    pub const SEARCH_BY_NAME: &str = "/search-members/by-name";
}

/// Workout session endpoints
pub mod sessions {
    pub const WORKOUT_SESSIONS: &str = "/workout-sessions";
    pub const WORKOUT_SESSION_BY_ID: &str = "/workout-session/:id";
    pub const BY_MEMBER: &str = "/workout-sessions/by-member";
}

/// API documentation
pub mod docs {
    pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
    pub const SWAGGER_UI: &str = "/swagger-ui";
}
