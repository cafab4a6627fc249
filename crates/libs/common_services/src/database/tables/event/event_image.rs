use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Metadata for one stored photo. The file itself lives on disk under the upload root.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventImage {
    pub id: i64,
    pub event_id: i32,
    pub url: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

/// Derives the stored filename from a public URL: its last path segment.
#[must_use]
pub fn filename_from_url(url: &str) -> String {
    url.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("unknown")
        .to_owned()
}
