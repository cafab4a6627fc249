use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Join row granting a user edit rights on an event.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventCollaborator {
    pub id: i64,
    pub event_id: i32,
    pub user_id: i32,
    pub added_at: DateTime<Utc>,
}

/// Collaborator row joined with the user's public fields.
#[derive(Debug, FromRow)]
pub struct CollaboratorRow {
    pub id: i64,
    pub event_id: i32,
    pub user_id: i32,
    pub added_at: DateTime<Utc>,
    pub user_email: String,
    pub user_name: String,
}
