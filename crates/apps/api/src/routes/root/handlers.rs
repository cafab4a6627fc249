use crate::api_state::ApiContext;
use crate::routes::api_doc::ApiDoc;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::error;
use utoipa::OpenApi;

const BANNER: &str = "Event gallery API";

/// Service banner.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses(
        (status = 200, description = "Service name", body = String)
    )
)]
pub async fn root() -> &'static str {
    BANNER
}

/// Liveness plus a database round trip.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "Database reachable", body = String),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn health_check(State(context): State<ApiContext>) -> Result<&'static str, StatusCode> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&context.pool)
        .await
        .map(|_| "OK")
        .map_err(|e| {
            error!("Health check could not reach the database: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        })
}

/// The OpenAPI document describing this API.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
