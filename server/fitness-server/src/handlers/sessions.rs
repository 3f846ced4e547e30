use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use database_layer::{NewWorkoutSession, WorkoutSession};
use serde_json::{Map, Value};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ApiResult, MessageResponse, ResourceResponse};
use crate::middleware::{IdPath, QueryParams, ValidatedJson};
use crate::server::FitnessServer;
use crate::validation::{
    date_field, integer_field, required_query_param, string_field, FieldErrors, Schema,
};

pub const SESSION_TIME_MAX_LEN: usize = 50;
pub const ACTIVITY_MAX_LEN: usize = 255;

/// Body of `POST /workout-sessions` and `PUT /workout-session/{id}`
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct WorkoutSessionPayload {
    #[schema(example = 1, minimum = 1)]
    pub member_id: i32,
    #[schema(value_type = String, format = Date, example = "2024-03-18")]
    pub session_date: NaiveDate,
    #[schema(example = "07:30", min_length = 1, max_length = 50)]
    pub session_time: String,
    #[schema(example = "Spin class", min_length = 1, max_length = 255)]
    pub activity: String,
}

impl Schema for WorkoutSessionPayload {
    const NAME: &'static str = "workout session payload";
    const FIELDS: &'static [&'static str] =
        &["member_id", "session_date", "session_time", "activity"];

    fn from_fields(object: &Map<String, Value>, errors: &mut FieldErrors) -> Option<Self> {
        let member_id = integer_field(object, "member_id", 1, errors);
        let session_date = date_field(object, "session_date", errors);
        let session_time = string_field(object, "session_time", SESSION_TIME_MAX_LEN, errors);
        let activity = string_field(object, "activity", ACTIVITY_MAX_LEN, errors);

        Some(Self {
            member_id: member_id?,
            session_date: session_date?,
            session_time: session_time?,
            activity: activity?,
        })
    }
}

impl From<WorkoutSessionPayload> for NewWorkoutSession {
    fn from(payload: WorkoutSessionPayload) -> Self {
        NewWorkoutSession {
            member_id: payload.member_id,
            session_date: payload.session_date,
            session_time: payload.session_time,
            activity: payload.activity,
        }
    }
}

/// Query for `GET /workout-sessions/by-member`
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionMemberQuery {
    /// Exact, case-sensitive name of the owning member
    ///
    /// Required. When the key repeats, the first value is used.
    pub member: Option<String>,
}

/// Schedule a workout session for an existing member
#[utoipa::path(
    post,
    path = "/workout-sessions",
    request_body = WorkoutSessionPayload,
    responses(
        (status = 201, description = "Workout session created", body = ResourceResponse<WorkoutSession>),
        (status = 400, description = "Invalid workout session payload", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Member not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "workout-sessions"
)]
pub async fn create_session(
    State(server): State<FitnessServer>,
    ValidatedJson(payload): ValidatedJson<WorkoutSessionPayload>,
) -> ApiResult<(StatusCode, Json<ResourceResponse<WorkoutSession>>)> {
    let session = server.sessions.create(payload.into()).await?;

    info!(
        session_id = session.session_id,
        member_id = session.member_id,
        "New workout session added"
    );
    Ok((
        StatusCode::CREATED,
        Json(ResourceResponse {
            message: "New workout session added successfully!".to_string(),
            data: session,
        }),
    ))
}

/// Replace every field of a workout session
#[utoipa::path(
    put,
    path = "/workout-session/{id}",
    params(("id" = i32, Path, description = "Workout session ID")),
    request_body = WorkoutSessionPayload,
    responses(
        (status = 201, description = "Workout session updated", body = ResourceResponse<WorkoutSession>),
        (status = 400, description = "Invalid workout session payload", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Workout session or member not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "workout-sessions"
)]
pub async fn update_session(
    State(server): State<FitnessServer>,
    IdPath(session_id): IdPath,
    ValidatedJson(payload): ValidatedJson<WorkoutSessionPayload>,
) -> ApiResult<(StatusCode, Json<ResourceResponse<WorkoutSession>>)> {
    let session = server.sessions.update(session_id, payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResourceResponse {
            message: "Workout session updated successfully!".to_string(),
            data: session,
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/workout-session/{id}",
    params(("id" = i32, Path, description = "Workout session ID")),
    responses(
        (status = 200, description = "Workout session removed", body = MessageResponse),
        (status = 404, description = "Workout session not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "workout-sessions"
)]
pub async fn delete_session(
    State(server): State<FitnessServer>,
    IdPath(session_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    server.sessions.delete(session_id).await?;

    Ok(Json(MessageResponse {
        message: "Workout session successfully removed!".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/workout-session/{id}",
    params(("id" = i32, Path, description = "Workout session ID")),
    responses(
        (status = 200, description = "Workout session found", body = WorkoutSession),
        (status = 404, description = "Workout session not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "workout-sessions"
)]
pub async fn get_session(
    State(server): State<FitnessServer>,
    IdPath(session_id): IdPath,
) -> ApiResult<Json<WorkoutSession>> {
    server
        .sessions
        .get_by_id(session_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Workout session"))
}

/// Every workout session, ordered by session id
#[utoipa::path(
    get,
    path = "/workout-sessions",
    responses((status = 200, description = "All workout sessions", body = Vec<WorkoutSession>)),
    tag = "workout-sessions"
)]
pub async fn list_sessions(
    State(server): State<FitnessServer>,
) -> ApiResult<Json<Vec<WorkoutSession>>> {
    Ok(Json(server.sessions.list_all().await?))
}

/// Sessions of the member with the given name; `[]` when they have none
#[utoipa::path(
    get,
    path = "/workout-sessions/by-member",
    params(SessionMemberQuery),
    responses(
        (status = 200, description = "Sessions of the member", body = Vec<WorkoutSession>),
        (status = 400, description = "Missing or empty `member`; reported as a validation error, never as 404", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Member not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "workout-sessions"
)]
pub async fn list_sessions_by_member(
    State(server): State<FitnessServer>,
    params: QueryParams,
) -> ApiResult<Json<Vec<WorkoutSession>>> {
    let name = required_query_param("member", params.first("member"))?;

    Ok(Json(server.sessions.list_by_member_name(&name).await?))
}
