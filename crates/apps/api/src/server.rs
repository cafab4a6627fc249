use crate::api_state::ApiContext;
use crate::create_router;
use app_state::{AppSettings, IngestionSettings};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get_service;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::ingest::sweep::sweep_orphans;
use http::{HeaderValue, header};
use sqlx::PgPool;
use std::iter::once;
use std::net::SocketAddr;
use tokio::fs;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tower_http::compression::CompressionLayer;
use tower_http::cors;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

fn cors_layer(settings: &AppSettings) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::PRAGMA,
        ])
}

/// The full application: API routes, stored uploads and the HTTP middleware stack.
pub fn build_app(api_state: ApiContext) -> Router {
    let settings = api_state.settings.clone();

    // Uploaded file names are unique, so they can be cached forever.
    let cache_layer = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000, immutable"),
    );
    let serve_dir = ServeDir::new(&settings.ingestion.upload_root);

    create_router(api_state)
        .nest_service(
            &settings.ingestion.public_path,
            get_service(serve_dir).layer(cache_layer),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(settings.api.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&settings))
        .layer(CompressionLayer::new())
        .layer(SetSensitiveRequestHeadersLayer::new(once(
            header::AUTHORIZATION,
        )))
}

/// Periodically removes upload files and directories the database no longer knows.
/// Returns `None` when the sweep interval is zero.
pub fn spawn_orphan_sweeper(pool: PgPool, settings: IngestionSettings) -> Option<JoinHandle<()>> {
    if settings.sweep_interval.is_zero() {
        info!("Orphan sweep disabled");
        return None;
    }

    Some(tokio::spawn(async move {
        let mut ticker = interval(settings.sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = sweep_orphans(&pool, &settings).await {
                warn!("Orphan sweep failed: {e:?}");
            }
        }
    }))
}

pub async fn serve(pool: PgPool, settings: AppSettings) -> Result<()> {
    info!("🚀 Initializing server...");
    fs::create_dir_all(&settings.ingestion.upload_root).await?;

    let _sweeper = spawn_orphan_sweeper(pool.clone(), settings.ingestion.clone());

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {}", e))?;

    let app = build_app(ApiContext {
        pool,
        settings: settings.clone(),
    });

    let listener = TcpListener::bind(addr).await?;
    info!("🐸 Server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
