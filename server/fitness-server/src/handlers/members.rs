use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use database_layer::{Member, NewMember};
use serde_json::{Map, Value};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ApiResult, MessageResponse, ResourceResponse};
use crate::middleware::{IdPath, QueryParams, ValidatedJson};
use crate::server::FitnessServer;
use crate::validation::{integer_field, required_query_param, string_field, FieldErrors, Schema};

/// Longest accepted member name, in characters
pub const NAME_MAX_LEN: usize = 255;

/// Body of `POST /members` and `PUT /member/{id}`
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct MemberPayload {
    #[schema(example = "Alice", min_length = 1, max_length = 255)]
    pub name: String,
    #[schema(example = 30, minimum = 1)]
    pub age: i32,
}

impl Schema for MemberPayload {
    const NAME: &'static str = "member payload";
    const FIELDS: &'static [&'static str] = &["name", "age"];

    fn from_fields(object: &Map<String, Value>, errors: &mut FieldErrors) -> Option<Self> {
        let name = string_field(object, "name", NAME_MAX_LEN, errors);
        let age = integer_field(object, "age", 1, errors);

        Some(Self {
            name: name?,
            age: age?,
        })
    }
}

impl From<MemberPayload> for NewMember {
    fn from(payload: MemberPayload) -> Self {
        NewMember {
            name: payload.name,
            age: payload.age,
        }
    }
}

/// Query for `GET /search-members/by-name`
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MemberNameQuery {
    /// Exact, case-sensitive member name
    ///
    /// Required. When the key repeats, the first value is used.
    pub name: Option<String>,
}

/// Add a new member
#[utoipa::path(
    post,
    path = "/members",
    request_body = MemberPayload,
    responses(
        (status = 201, description = "Member created", body = ResourceResponse<Member>),
        (status = 400, description = "Invalid member payload", body = crate::error::ApiErrorResponse)
    ),
    tag = "members"
)]
pub async fn create_member(
    State(server): State<FitnessServer>,
    ValidatedJson(payload): ValidatedJson<MemberPayload>,
) -> ApiResult<(StatusCode, Json<ResourceResponse<Member>>)> {
    let member = server.members.create(payload.into()).await?;

    info!(member_id = member.id, "New member added");
    Ok((
        StatusCode::CREATED,
        Json(ResourceResponse {
            message: "New member added successfully!".to_string(),
            data: member,
        }),
    ))
}

/// Replace a member's name and age
#[utoipa::path(
    put,
    path = "/member/{id}",
    params(("id" = i32, Path, description = "Member ID")),
    request_body = MemberPayload,
    responses(
        (status = 201, description = "Member updated", body = ResourceResponse<Member>),
        (status = 400, description = "Invalid member payload", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Member not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "members"
)]
pub async fn update_member(
    State(server): State<FitnessServer>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<MemberPayload>,
) -> ApiResult<(StatusCode, Json<ResourceResponse<Member>>)> {
    let member = server.members.update(id, payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResourceResponse {
            message: "Member updated successfully!".to_string(),
            data: member,
        }),
    ))
}

/// Remove a member together with their workout sessions
#[utoipa::path(
    delete,
    path = "/member/{id}",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member removed", body = MessageResponse),
        (status = 404, description = "Member not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "members"
)]
pub async fn delete_member(
    State(server): State<FitnessServer>,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    server.members.delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Member successfully removed!".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/member/{id}",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member found", body = Member),
        (status = 404, description = "Member not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "members"
)]
pub async fn get_member(
    State(server): State<FitnessServer>,
    IdPath(id): IdPath,
) -> ApiResult<Json<Member>> {
    server
        .members
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Member"))
}

/// Every member, ordered by id
#[utoipa::path(
    get,
    path = "/members",
    responses((status = 200, description = "All members", body = Vec<Member>)),
    tag = "members"
)]
pub async fn list_members(State(server): State<FitnessServer>) -> ApiResult<Json<Vec<Member>>> {
    Ok(Json(server.members.list_all().await?))
}

/// Look a member up by exact name; the lowest id wins when names repeat
#[utoipa::path(
    get,
    path = "/search-members/by-name",
    params(MemberNameQuery),
    responses(
        (status = 200, description = "Member found", body = Member),
        (status = 400, description = "Missing or empty `name`; reported as a validation error, never as 404", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Member not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "members"
)]
pub async fn search_member_by_name(
    State(server): State<FitnessServer>,
    params: QueryParams,
) -> ApiResult<Json<Member>> {
    let name = required_query_param("name", params.first("name"))?;

    server
        .members
        .get_by_name(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Member"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::messages;
    use serde_json::json;

    fn field_errors(payload: Value) -> crate::error::FieldErrorMap {
        match MemberPayload::load(&payload) {
            Err(ApiError::Validation {
                field_errors: Some(fields),
                ..
            }) => fields,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_member_payload_accepts_numeric_string_age() {
        let payload = MemberPayload::load(&json!({"name": "Alice", "age": "30"})).unwrap();
        assert_eq!(
            payload,
            MemberPayload {
                name: "Alice".to_string(),
                age: 30
            }
        );
    }

    #[test]
    fn test_member_payload_rejects_id() {
        let fields = field_errors(json!({"id": 3, "name": "Alice", "age": 30}));
        assert_eq!(fields["id"], vec![messages::UNKNOWN_FIELD.to_string()]);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_member_name_limit() {
        let long_name = "x".repeat(NAME_MAX_LEN + 1);
        let fields = field_errors(json!({"name": long_name, "age": 30}));
        assert_eq!(fields["name"], vec![messages::too_long(NAME_MAX_LEN)]);

        assert!(MemberPayload::load(&json!({"name": "x".repeat(NAME_MAX_LEN), "age": 30})).is_ok());
    }
}
