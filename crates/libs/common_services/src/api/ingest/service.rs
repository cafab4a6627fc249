use crate::api::event::service::require_edit_access;
use crate::api::ingest::error::IngestError;
use crate::api::ingest::filename::unique_filename;
use crate::api::ingest::files::{Removal, delete_event_directory, delete_file, parse_public_url};
use crate::api::ingest::interfaces::{UploadFile, UploadOutcome, UploadResponse, UploadedFile};
use crate::api::ingest::pipeline::{ImageOptions, optimize_image};
use crate::database::event_store::EventStore;
use app_state::{IngestionSettings, is_safe_path_segment};
use futures_util::future::join_all;
use sqlx::PgPool;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Optimizes and stores one file, returning its public URL.
async fn store_one(
    file: UploadFile,
    options: ImageOptions,
    event_dir: PathBuf,
    extension: String,
) -> Result<String, IngestError> {
    let bytes = file.bytes;
    let optimized = tokio::task::spawn_blocking(move || optimize_image(&bytes, &options)).await??;

    let filename = unique_filename(&file.original_name, &extension);
    tokio::fs::write(event_dir.join(&filename), &optimized.bytes).await?;
    Ok(filename)
}

/// Optimizes every uploaded file and stores it in the event's upload folder.
///
/// Files are processed concurrently. The per-file results, and `image_urls`,
/// keep the order of the upload. A file that fails does not fail the batch.
///
/// # Errors
///
/// * `IngestError::BadRequest` if the slug or the file list is empty.
/// * `IngestError::NotFound` if the event does not exist.
/// * `IngestError::Forbidden` if the caller cannot edit the event.
#[instrument(skip(pool, settings, files), fields(file_count = files.len()))]
pub async fn upload_images(
    pool: &PgPool,
    settings: &IngestionSettings,
    event_slug: &str,
    files: Vec<UploadFile>,
    requester_id: i32,
) -> Result<UploadResponse, IngestError> {
    if files.is_empty() {
        return Err(IngestError::BadRequest("No files received".to_owned()));
    }
    if event_slug.is_empty() {
        return Err(IngestError::BadRequest("No event slug provided".to_owned()));
    }
    if !is_safe_path_segment(event_slug) {
        return Err(IngestError::BadRequest(format!("Invalid event slug: {event_slug}")));
    }
    require_edit_access(pool, event_slug, requester_id).await?;

    let event_dir = settings.event_dir(event_slug);
    tokio::fs::create_dir_all(&event_dir).await?;

    let options = ImageOptions::from(settings);
    let tasks = files.into_iter().map(|file| {
        let original_name = file.original_name.clone();
        let stored = store_one(file, options, event_dir.clone(), settings.extension.clone());
        async move { (original_name, stored.await) }
    });

    let results: Vec<UploadedFile> = join_all(tasks)
        .await
        .into_iter()
        .map(|(original_name, result)| match result {
            Ok(filename) => UploadedFile {
                original_name,
                url: Some(settings.public_url(event_slug, &filename)),
                error: None,
            },
            Err(e) => {
                warn!("Upload of {original_name} failed: {e:?}");
                let error = match e {
                    IngestError::BadRequest(message) => message,
                    _ => "Failed to store image".to_owned(),
                };
                UploadedFile {
                    original_name,
                    url: None,
                    error: Some(error),
                }
            }
        })
        .collect();

    let outcome = UploadOutcome::from_results(&results);
    let image_urls: Vec<String> = results.iter().filter_map(|r| r.url.clone()).collect();
    info!(
        "Stored {}/{} uploads for {event_slug}",
        image_urls.len(),
        results.len()
    );

    Ok(UploadResponse {
        success: outcome != UploadOutcome::Failed,
        message: format!("{} files uploaded successfully", image_urls.len()),
        outcome,
        files: results,
        image_urls,
    })
}

/// Deletes a stored file by its public URL.
///
/// While the event still exists the caller has to be able to edit it. Once the
/// event is gone any authenticated caller may clean up its files.
#[instrument(skip(pool, settings))]
pub async fn delete_image_file(
    pool: &PgPool,
    settings: &IngestionSettings,
    image_url: &str,
    requester_id: i32,
) -> Result<Removal, IngestError> {
    let file = parse_public_url(settings, image_url)?;
    if EventStore::slug_exists(pool, &file.slug).await? {
        require_edit_access(pool, &file.slug, requester_id).await?;
    }
    delete_file(settings, image_url).await
}

/// Deletes the upload directory of an event that no longer exists.
///
/// Event deletion already removes the directory; this is the idempotent
/// cleanup for directories left behind.
///
/// # Errors
///
/// * `IngestError::Conflict` while the event still exists.
#[instrument(skip(pool, settings))]
pub async fn delete_event_images(
    pool: &PgPool,
    settings: &IngestionSettings,
    event_slug: &str,
) -> Result<Removal, IngestError> {
    if event_slug.is_empty() {
        return Err(IngestError::BadRequest("No event slug provided".to_owned()));
    }
    if EventStore::slug_exists(pool, event_slug).await? {
        return Err(IngestError::Conflict(
            "Event still exists, delete the event instead".to_owned(),
        ));
    }
    delete_event_directory(settings, event_slug).await
}
