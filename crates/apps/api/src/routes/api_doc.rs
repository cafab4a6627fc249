use crate::routes::{auth, events, root, uploads};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        // Auth handlers
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::refresh_session,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Event handlers
        events::handlers::list_events_handler,
        events::handlers::create_event_handler,
        events::handlers::get_event_handler,
        events::handlers::delete_event_handler,
        events::handlers::add_images_handler,
        events::handlers::remove_image_handler,
        events::handlers::add_collaborator_handler,
        events::handlers::remove_collaborator_handler,
        // Upload handlers
        uploads::handlers::upload_handler,
        uploads::handlers::delete_image_handler,
        uploads::handlers::delete_event_images_handler,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and sessions"),
        (name = "Events", description = "Events, their galleries and collaborators"),
        (name = "Uploads", description = "Image upload and stored file cleanup"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
