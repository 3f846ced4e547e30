// Database models
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A fitness-center client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Member {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = 30)]
    pub age: i32,
}

/// Validated member fields, without the store-generated id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub age: i32,
}

/// A workout session owned by exactly one member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct WorkoutSession {
    #[schema(example = 1)]
    pub session_id: i32,
    #[schema(example = 1)]
    pub member_id: i32,
    #[schema(value_type = String, format = Date, example = "2024-03-18")]
    pub session_date: NaiveDate,
    #[schema(example = "07:30")]
    pub session_time: String,
    #[schema(example = "Spin class")]
    pub activity: String,
}

/// Validated session fields, without the store-generated id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkoutSession {
    pub member_id: i32,
    pub session_date: NaiveDate,
    pub session_time: String,
    pub activity: String,
}

impl NewMember {
    pub(crate) fn into_member(self, id: i32) -> Member {
        Member {
            id,
            name: self.name,
            age: self.age,
        }
    }
}

impl NewWorkoutSession {
    pub(crate) fn into_session(self, session_id: i32) -> WorkoutSession {
        WorkoutSession {
            session_id,
            member_id: self.member_id,
            session_date: self.session_date,
            session_time: self.session_time,
            activity: self.activity,
        }
    }
}
