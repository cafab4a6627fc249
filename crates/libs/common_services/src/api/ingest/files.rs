use crate::api::ingest::error::IngestError;
use app_state::{IngestionSettings, is_safe_path_segment};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

/// A stored upload addressed by its public URL: `{public_path}/{slug}/{filename}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicFile {
    pub slug: String,
    pub filename: String,
}

impl PublicFile {
    #[must_use]
    pub fn path(&self, settings: &IngestionSettings) -> PathBuf {
        settings.event_dir(&self.slug).join(&self.filename)
    }
}

/// Whether a delete found something to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    AlreadyAbsent,
}

/// Maps a public upload URL back to its slug and filename.
///
/// Only URLs of exactly the form `{public_path}/{slug}/{filename}` with plain
/// segments are accepted, so the resulting path cannot leave the upload root.
///
/// # Errors
///
/// * `IngestError::BadRequest` for any other shape.
pub fn parse_public_url(settings: &IngestionSettings, url: &str) -> Result<PublicFile, IngestError> {
    let invalid = || IngestError::BadRequest(format!("Not an upload URL: {url}"));

    let rest = url
        .strip_prefix(settings.public_path.as_str())
        .and_then(|rest| rest.strip_prefix('/'))
        .ok_or_else(invalid)?;

    let mut segments = rest.split('/');
    let (Some(slug), Some(filename), None) = (segments.next(), segments.next(), segments.next())
    else {
        return Err(invalid());
    };
    if !is_safe_path_segment(slug) || !is_safe_path_segment(filename) {
        return Err(invalid());
    }

    Ok(PublicFile {
        slug: slug.to_owned(),
        filename: filename.to_owned(),
    })
}

/// Deletes the file behind a public URL. A missing file counts as success.
///
/// # Errors
///
/// * `IngestError::BadRequest` if the URL does not point into the upload root.
/// * `IngestError::Internal` for any I/O failure other than "not found".
pub async fn delete_file(settings: &IngestionSettings, url: &str) -> Result<Removal, IngestError> {
    let file = parse_public_url(settings, url)?;
    let path = file.path(settings);

    match tokio::fs::remove_file(&path).await {
        Ok(()) => {
            info!("Deleted upload {}", path.display());
            Ok(Removal::Deleted)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Upload {} was already gone", path.display());
            Ok(Removal::AlreadyAbsent)
        }
        Err(e) => Err(e.into()),
    }
}

/// Deletes an event's upload directory with everything in it. A missing
/// directory counts as success.
///
/// # Errors
///
/// * `IngestError::BadRequest` if the slug is not a single path segment.
/// * `IngestError::Internal` for any I/O failure other than "not found".
pub async fn delete_event_directory(
    settings: &IngestionSettings,
    slug: &str,
) -> Result<Removal, IngestError> {
    if !is_safe_path_segment(slug) {
        return Err(IngestError::BadRequest(format!("Invalid event slug: {slug}")));
    }
    let dir = settings.event_dir(slug);

    match tokio::fs::remove_dir_all(&dir).await {
        Ok(()) => {
            info!("Deleted upload directory {}", dir.display());
            Ok(Removal::Deleted)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Removal::AlreadyAbsent),
        Err(e) => Err(e.into()),
    }
}
