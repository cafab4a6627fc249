use crate::api::event::interfaces::CollaboratorSummary;
use crate::database::app_user::UserSummary;
use crate::database::event::event_image::EventImage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents a single event row.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub owner_id: i32,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Event row joined with the owner's public fields.
#[derive(Debug, FromRow)]
pub struct EventWithOwnerRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub owner_id: i32,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub owner_email: String,
    pub owner_name: String,
}

impl EventWithOwnerRow {
    #[must_use]
    pub fn into_parts(self) -> (Event, UserSummary) {
        let owner = UserSummary {
            id: self.owner_id,
            email: self.owner_email,
            name: self.owner_name,
        };
        let event = Event {
            id: self.id,
            name: self.name,
            slug: self.slug,
            owner_id: self.owner_id,
            is_public: self.is_public,
            created_at: self.created_at,
        };
        (event, owner)
    }
}

/// Who may touch an event: the owner plus every collaborator.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct EventAccess {
    pub event_id: i32,
    pub owner_id: i32,
    pub collaborator_ids: Vec<i32>,
}

/// An event with its gallery, collaborators and owner.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub owner_id: i32,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub owner: UserSummary,
    /// Newest first.
    pub images: Vec<EventImage>,
    pub collaborators: Vec<CollaboratorSummary>,
}

impl EventDetails {
    #[must_use]
    pub fn new(
        event: Event,
        owner: UserSummary,
        images: Vec<EventImage>,
        collaborators: Vec<CollaboratorSummary>,
    ) -> Self {
        Self {
            id: event.id,
            name: event.name,
            slug: event.slug,
            owner_id: event.owner_id,
            is_public: event.is_public,
            created_at: event.created_at,
            owner,
            images,
            collaborators,
        }
    }

    #[must_use]
    pub fn access(&self) -> EventAccess {
        EventAccess {
            event_id: self.id,
            owner_id: self.owner_id,
            collaborator_ids: self.collaborators.iter().map(|c| c.user_id).collect(),
        }
    }
}
