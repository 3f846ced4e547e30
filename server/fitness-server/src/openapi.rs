use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::routes::paths;
use crate::server::FitnessServer;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,

        // Member endpoints
        crate::handlers::members::create_member,
        crate::handlers::members::update_member,
        crate::handlers::members::delete_member,
        crate::handlers::members::get_member,
        crate::handlers::members::list_members,
        crate::handlers::members::search_member_by_name,

        // Workout session endpoints
        crate::handlers::sessions::create_session,
        crate::handlers::sessions::update_session,
        crate::handlers::sessions::delete_session,
        crate::handlers::sessions::get_session,
        crate::handlers::sessions::list_sessions,
        crate::handlers::sessions::list_sessions_by_member,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::members::MemberPayload,
            crate::handlers::sessions::WorkoutSessionPayload,
            crate::error::ApiErrorResponse,
            crate::error::MessageResponse,
            database_layer::Member,
            database_layer::WorkoutSession,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "members", description = "Fitness center members"),
        (name = "workout-sessions", description = "Workout sessions booked by members"),
    ),
    info(
        title = "Fitness Center API",
        version = "0.1.0",
        description = "Manage fitness center members and their workout sessions.",
        license(name = "AGPL-3.0-only"),
    ),
)]
pub struct ApiDoc;

/// Swagger UI plus the raw OpenAPI document
pub fn create_docs_routes() -> Router<FitnessServer> {
    Router::new().merge(SwaggerUi::new(paths::docs::SWAGGER_UI).url(paths::docs::OPENAPI_JSON, ApiDoc::openapi()))
}
