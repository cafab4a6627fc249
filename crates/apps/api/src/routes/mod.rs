mod api_doc;
pub mod auth;
pub mod events;
pub mod json_body;
pub mod root;
pub mod uploads;

use crate::api_state::ApiContext;
use crate::auth::middlewares::optional_user::OptionalUser;
use crate::auth::middlewares::user::RequireUser;
use crate::auth::router::{auth_protected_router, auth_public_router};
use crate::events::router::{events_auth_optional_router, events_protected_router};
use crate::root::router::root_public_router;
use crate::routes::api_doc::ApiDoc;
use crate::uploads::router::uploads_protected_router;
use axum::Router;
use axum::middleware::from_extractor_with_state;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    Router::new()
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .merge(public_routes())
        .merge(protected_routes(api_state.clone()))
        .merge(auth_optional_routes(api_state.clone()))
        .with_state(api_state)
}

fn public_routes() -> Router<ApiContext> {
    Router::new()
        .merge(auth_public_router())
        .merge(root_public_router())
}

fn auth_optional_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(events_auth_optional_router())
        .route_layer(from_extractor_with_state::<OptionalUser, ApiContext>(
            api_state,
        ))
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(auth_protected_router())
        .merge(events_protected_router())
        .merge(uploads_protected_router())
        .route_layer(from_extractor_with_state::<RequireUser, ApiContext>(api_state))
}
