use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One file taken from the multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub original_name: String,
    pub bytes: Bytes,
}

/// What happened to one uploaded file.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UploadOutcome {
    Complete,
    Partial,
    Failed,
}

impl UploadOutcome {
    #[must_use]
    pub fn from_results(files: &[UploadedFile]) -> Self {
        let stored = files.iter().filter(|file| file.url.is_some()).count();
        if stored == files.len() {
            Self::Complete
        } else if stored == 0 {
            Self::Failed
        } else {
            Self::Partial
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub outcome: UploadOutcome,
    /// Per-file results in upload order.
    pub files: Vec<UploadedFile>,
    /// Public URLs of the stored files in upload order.
    pub image_urls: Vec<String>,
}

/// Multipart form accepted by `POST /upload`, for the API docs.
#[derive(Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadForm {
    pub event_slug: String,
    #[schema(value_type = Vec<String>, format = Binary)]
    pub files: Vec<Vec<u8>>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageRequest {
    pub image_url: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventImagesRequest {
    pub event_slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(name: &str) -> UploadedFile {
        UploadedFile {
            original_name: name.to_owned(),
            url: Some(format!("/uploads/e/{name}")),
            error: None,
        }
    }

    fn failed(name: &str) -> UploadedFile {
        UploadedFile {
            original_name: name.to_owned(),
            url: None,
            error: Some("bad".to_owned()),
        }
    }

    #[test]
    fn outcome_from_results() {
        assert_eq!(
            UploadOutcome::from_results(&[ok("a"), ok("b")]),
            UploadOutcome::Complete
        );
        assert_eq!(
            UploadOutcome::from_results(&[ok("a"), failed("b")]),
            UploadOutcome::Partial
        );
        assert_eq!(
            UploadOutcome::from_results(&[failed("a")]),
            UploadOutcome::Failed
        );
    }

    #[test]
    fn outcome_serializes_lowercase() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&UploadOutcome::Partial)?, "\"partial\"");
        Ok(())
    }
}
