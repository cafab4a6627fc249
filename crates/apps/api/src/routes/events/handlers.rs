use crate::api_state::ApiContext;
use crate::auth::middlewares::optional_user::OptionalUser;
use crate::json_body::JsonBody;
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use common_services::api::event::error::EventError;
use common_services::api::event::interfaces::{
    AddCollaboratorRequest, AddImagesRequest, CollaboratorResponse, CreateEventRequest,
    EventDetailsResponse, EventListResponse, EventResponse, ImagesResponse, RemoveImageRequest,
    UserIdQuery,
};
use common_services::api::event::service::{
    add_collaborator, add_images, create_event, delete_event, get_event, list_events_for_user,
    remove_collaborator, remove_image,
};
use common_services::api::policy::{can_edit, claimed_identity_matches};
use common_services::api::{ErrorBody, SuccessResponse};
use common_services::database::app_user::User;
use tracing::instrument;

/// Identity fields in requests are optional, but may not name someone else.
fn check_claimed_identity(claimed: Option<i32>, user: &User) -> Result<(), EventError> {
    if claimed_identity_matches(claimed, user.id) {
        Ok(())
    } else {
        Err(EventError::Forbidden(
            "User id does not match the authenticated user".to_owned(),
        ))
    }
}

/// List the events of the current user.
///
/// Returns every event the user owns or collaborates on, newest first.
#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    params(UserIdQuery),
    responses(
        (status = 200, description = "The user's events.", body = EventListResponse),
        (status = 401, description = "Authentication required.", body = ErrorBody),
        (status = 403, description = "userId names another user.", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn list_events_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<EventListResponse>, EventError> {
    check_claimed_identity(query.user_id, &user)?;
    let events = list_events_for_user(&context.pool, user.id).await?;
    Ok(Json(EventListResponse {
        success: true,
        events,
    }))
}

/// Create a new event owned by the current user.
///
/// The slug is derived from the name; a taken slug gets a timestamp suffix.
#[utoipa::path(
    post,
    path = "/events",
    tag = "Events",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event created.", body = EventResponse),
        (status = 400, description = "Name is missing.", body = ErrorBody),
        (status = 403, description = "ownerId names another user.", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn create_event_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    JsonBody(payload): JsonBody<CreateEventRequest>,
) -> Result<Json<EventResponse>, EventError> {
    check_claimed_identity(payload.owner_id, &user)?;
    let event = create_event(&context.pool, &payload.name, user.id).await?;
    Ok(Json(EventResponse {
        success: true,
        event,
    }))
}

/// Get an event with its images, collaborators and owner.
///
/// Events are public. `canEdit` tells whether the caller may change the gallery.
#[utoipa::path(
    get,
    path = "/events/{slug}",
    tag = "Events",
    params(("slug" = String, Path, description = "The event slug.")),
    responses(
        (status = 200, description = "The event.", body = EventDetailsResponse),
        (status = 404, description = "Event not found.", body = ErrorBody),
    )
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn get_event_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<OptionalUser>,
    Path(slug): Path<String>,
) -> Result<Json<EventDetailsResponse>, EventError> {
    let event = get_event(&context.pool, &slug).await?;
    let editable = can_edit(&event.access(), user.id());
    Ok(Json(EventDetailsResponse {
        success: true,
        event,
        can_edit: editable,
    }))
}

/// Delete an event. Only the owner may do this.
///
/// Images and collaborators are removed with it, then its upload folder.
#[utoipa::path(
    delete,
    path = "/events/{slug}",
    tag = "Events",
    params(
        ("slug" = String, Path, description = "The event slug."),
        UserIdQuery
    ),
    responses(
        (status = 200, description = "Event deleted.", body = SuccessResponse),
        (status = 403, description = "Caller is not the owner.", body = ErrorBody),
        (status = 404, description = "Event not found.", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn delete_event_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<SuccessResponse>, EventError> {
    check_claimed_identity(query.user_id, &user)?;
    delete_event(&context.pool, &context.settings.ingestion, &slug, user.id).await?;
    Ok(Json(SuccessResponse::with_message(
        "Event deleted successfully",
    )))
}

/// Record uploaded image URLs on an event.
#[utoipa::path(
    post,
    path = "/events/{slug}/images",
    tag = "Events",
    params(("slug" = String, Path, description = "The event slug.")),
    request_body = AddImagesRequest,
    responses(
        (status = 200, description = "Images recorded, in request order.", body = ImagesResponse),
        (status = 400, description = "imageUrls is missing.", body = ErrorBody),
        (status = 403, description = "Caller cannot edit this event.", body = ErrorBody),
        (status = 404, description = "Event not found.", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), err(Debug))]
pub async fn add_images_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
    JsonBody(payload): JsonBody<AddImagesRequest>,
) -> Result<Json<ImagesResponse>, EventError> {
    let image_urls = payload
        .image_urls
        .ok_or_else(|| EventError::BadRequest("Image URLs array is required".to_owned()))?;
    let images = add_images(&context.pool, &slug, &image_urls, user.id).await?;
    Ok(Json(ImagesResponse {
        success: true,
        images,
    }))
}

/// Remove an image from an event's gallery. The file itself is not touched.
#[utoipa::path(
    delete,
    path = "/events/{slug}/images",
    tag = "Events",
    params(("slug" = String, Path, description = "The event slug.")),
    request_body = RemoveImageRequest,
    responses(
        (status = 200, description = "Image removed.", body = SuccessResponse),
        (status = 400, description = "imageUrl is missing.", body = ErrorBody),
        (status = 403, description = "Caller cannot edit this event.", body = ErrorBody),
        (status = 404, description = "Event or image not found.", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn remove_image_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
    JsonBody(payload): JsonBody<RemoveImageRequest>,
) -> Result<Json<SuccessResponse>, EventError> {
    let image_url = payload
        .image_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| EventError::BadRequest("Image URL is required".to_owned()))?;
    remove_image(&context.pool, &slug, &image_url, user.id).await?;
    Ok(Json(SuccessResponse::with_message(
        "Image deleted successfully",
    )))
}

/// Invite a registered user, by email, to add photos to an event. Owner only.
#[utoipa::path(
    post,
    path = "/events/{slug}/collaborators",
    tag = "Events",
    params(("slug" = String, Path, description = "The event slug.")),
    request_body = AddCollaboratorRequest,
    responses(
        (status = 200, description = "Collaborator added.", body = CollaboratorResponse),
        (status = 403, description = "Caller is not the owner.", body = ErrorBody),
        (status = 404, description = "Event or user not found.", body = ErrorBody),
        (status = 409, description = "User is already a collaborator.", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn add_collaborator_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
    JsonBody(payload): JsonBody<AddCollaboratorRequest>,
) -> Result<Json<CollaboratorResponse>, EventError> {
    check_claimed_identity(payload.requester_id, &user)?;
    let collaborator = add_collaborator(&context.pool, &slug, &payload.user_email, user.id).await?;
    Ok(Json(CollaboratorResponse {
        success: true,
        message: "Collaborator added successfully".to_owned(),
        collaborator,
    }))
}

/// Remove a collaborator from an event. Owner only.
#[utoipa::path(
    delete,
    path = "/events/{slug}/collaborators/{user_id}",
    tag = "Events",
    params(
        ("slug" = String, Path, description = "The event slug."),
        ("user_id" = i32, Path, description = "Id of the collaborating user.")
    ),
    responses(
        (status = 200, description = "Collaborator removed.", body = SuccessResponse),
        (status = 403, description = "Caller is not the owner.", body = ErrorBody),
        (status = 404, description = "Event or collaborator not found.", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn remove_collaborator_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path((slug, user_id)): Path<(String, i32)>,
) -> Result<Json<SuccessResponse>, EventError> {
    remove_collaborator(&context.pool, &slug, user_id, user.id).await?;
    Ok(Json(SuccessResponse::with_message(
        "Collaborator removed successfully",
    )))
}
