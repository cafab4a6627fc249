use crate::database::app_user::UserSummary;
use crate::database::event::event::{Event, EventDetails};
use crate::database::event::event_collaborator::CollaboratorRow;
use crate::database::event::event_image::EventImage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// --- Request Payloads ---

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub name: String,
    /// Optional, must equal the authenticated user when sent.
    pub owner_id: Option<i32>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddImagesRequest {
    pub image_urls: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RemoveImageRequest {
    pub image_url: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddCollaboratorRequest {
    #[serde(default)]
    pub user_email: String,
    /// Optional, must equal the authenticated user when sent.
    pub requester_id: Option<i32>,
}

// --- Query Parameters ---

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    /// Optional, must equal the authenticated user when sent.
    pub user_id: Option<i32>,
}

// --- Response Bodies ---

/// A collaborator link together with the collaborator's public fields.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorSummary {
    pub id: i64,
    pub user_id: i32,
    pub added_at: DateTime<Utc>,
    pub user: UserSummary,
}

impl From<CollaboratorRow> for CollaboratorSummary {
    fn from(row: CollaboratorRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            added_at: row.added_at,
            user: UserSummary {
                id: row.user_id,
                email: row.user_email,
                name: row.user_name,
            },
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub success: bool,
    pub event: Event,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailsResponse {
    pub success: bool,
    pub event: EventDetails,
    /// Whether the caller may add or remove images.
    pub can_edit: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventListResponse {
    pub success: bool,
    pub events: Vec<EventDetails>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImagesResponse {
    pub success: bool,
    pub images: Vec<EventImage>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorResponse {
    pub success: bool,
    pub message: String,
    pub collaborator: CollaboratorSummary,
}
