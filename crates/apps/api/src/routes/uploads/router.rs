use crate::api_state::ApiContext;
use crate::routes::uploads::handlers::{
    delete_event_images_handler, delete_image_handler, upload_handler,
};
use axum::{
    Router,
    routing::{delete, post},
};

pub fn uploads_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/upload", post(upload_handler))
        .route("/delete-image", delete(delete_image_handler))
        .route("/delete-event-images", delete(delete_event_images_handler))
}
