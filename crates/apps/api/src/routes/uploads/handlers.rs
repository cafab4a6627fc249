use crate::api_state::ApiContext;
use crate::json_body::JsonBody;
use axum::extract::{Multipart, State};
use axum::{Extension, Json};
use common_services::api::ingest::error::IngestError;
use common_services::api::ingest::files::Removal;
use common_services::api::ingest::interfaces::{
    DeleteEventImagesRequest, DeleteImageRequest, UploadFile, UploadForm, UploadResponse,
};
use common_services::api::ingest::service::{
    delete_event_images, delete_image_file, upload_images,
};
use common_services::api::{ErrorBody, SuccessResponse};
use common_services::database::app_user::User;
use tracing::{debug, instrument};

/// Reads the `eventSlug` field and every `files` part from the upload form.
async fn read_upload_form(
    multipart: &mut Multipart,
) -> Result<(String, Vec<UploadFile>), IngestError> {
    let mut event_slug = String::new();
    let mut files = vec![];

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IngestError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("eventSlug") => {
                event_slug = field
                    .text()
                    .await
                    .map_err(|e| IngestError::BadRequest(format!("Invalid eventSlug: {e}")))?
                    .trim()
                    .to_owned();
            }
            Some("files" | "files[]") => {
                let original_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(|e| {
                    IngestError::BadRequest(format!("Could not read {original_name}: {e}"))
                })?;
                files.push(UploadFile {
                    original_name,
                    bytes,
                });
            }
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }

    Ok((event_slug, files))
}

/// Upload images to an event.
///
/// Every file is resized to fit the configured bounds and stored as WebP.
/// Results come back per file in upload order; a broken file does not fail the batch.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Uploads",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Per-file upload results.", body = UploadResponse),
        (status = 400, description = "No files or no event slug.", body = ErrorBody),
        (status = 403, description = "Caller cannot edit this event.", body = ErrorBody),
        (status = 404, description = "Event not found.", body = ErrorBody),
        (status = 413, description = "Upload exceeds the size limit."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, multipart), err(Debug))]
pub async fn upload_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, IngestError> {
    let (event_slug, files) = read_upload_form(&mut multipart).await?;
    let response = upload_images(
        &context.pool,
        &context.settings.ingestion,
        &event_slug,
        files,
        user.id,
    )
    .await?;
    Ok(Json(response))
}

/// Delete a stored image file by its public URL. Missing files count as deleted.
#[utoipa::path(
    delete,
    path = "/delete-image",
    tag = "Uploads",
    request_body = DeleteImageRequest,
    responses(
        (status = 200, description = "File deleted or already gone.", body = SuccessResponse),
        (status = 400, description = "Missing or foreign image URL.", body = ErrorBody),
        (status = 403, description = "Caller cannot edit the event.", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn delete_image_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    JsonBody(payload): JsonBody<DeleteImageRequest>,
) -> Result<Json<SuccessResponse>, IngestError> {
    let image_url = payload
        .image_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| IngestError::BadRequest("No image URL provided".to_owned()))?;

    let message = match delete_image_file(
        &context.pool,
        &context.settings.ingestion,
        &image_url,
        user.id,
    )
    .await?
    {
        Removal::Deleted => "File deleted successfully",
        Removal::AlreadyAbsent => "File already deleted or not found",
    };
    Ok(Json(SuccessResponse::with_message(message)))
}

/// Delete the upload folder of an event that no longer exists.
#[utoipa::path(
    delete,
    path = "/delete-event-images",
    tag = "Uploads",
    request_body = DeleteEventImagesRequest,
    responses(
        (status = 200, description = "Folder deleted or already gone.", body = SuccessResponse),
        (status = 400, description = "Missing or invalid event slug.", body = ErrorBody),
        (status = 409, description = "The event still exists.", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, _user), err(Debug))]
pub async fn delete_event_images_handler(
    State(context): State<ApiContext>,
    Extension(_user): Extension<User>,
    JsonBody(payload): JsonBody<DeleteEventImagesRequest>,
) -> Result<Json<SuccessResponse>, IngestError> {
    let event_slug = payload.event_slug.unwrap_or_default();
    let message = match delete_event_images(
        &context.pool,
        &context.settings.ingestion,
        event_slug.trim(),
    )
    .await?
    {
        Removal::Deleted => "Event images directory deleted successfully",
        Removal::AlreadyAbsent => "Event directory already deleted or not found",
    };
    Ok(Json(SuccessResponse::with_message(message)))
}
