use crate::api_state::ApiContext;
use crate::routes::events::handlers::{
    add_collaborator_handler, add_images_handler, create_event_handler, delete_event_handler,
    get_event_handler, list_events_handler, remove_collaborator_handler, remove_image_handler,
};
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn events_auth_optional_router() -> Router<ApiContext> {
    Router::new().route("/events/{slug}", get(get_event_handler))
}

pub fn events_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/events",
            get(list_events_handler).post(create_event_handler),
        )
        .route("/events/{slug}", delete(delete_event_handler))
        .route(
            "/events/{slug}/images",
            post(add_images_handler).delete(remove_image_handler),
        )
        .route(
            "/events/{slug}/collaborators",
            post(add_collaborator_handler),
        )
        .route(
            "/events/{slug}/collaborators/{user_id}",
            delete(remove_collaborator_handler),
        )
}
