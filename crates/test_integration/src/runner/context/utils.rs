use app_state::{AppSettings, DatabaseSettings, load_settings_from_path};
use color_eyre::eyre::Result;
use common_services::database::{get_db_pool, run_migrations};
use sqlx::{Executor, PgPool};
use std::net::TcpListener;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tracing::info;
use url::Url;

/// Points the workspace settings at a throwaway database, upload folder and port.
pub fn create_test_settings(
    base_database_url: &str,
    database_name: &str,
) -> Result<(AppSettings, TempDir)> {
    let settings_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/settings.yaml");
    let mut settings = load_settings_from_path(&settings_path, false)?;

    let upload_dir = TempDir::new()?;
    let port = get_free_port()?;
    settings.api.host = "127.0.0.1".to_owned();
    settings.api.port = u32::from(port);
    settings.api.public_url = format!("http://127.0.0.1:{port}");
    settings.ingestion.upload_root = upload_dir.path().to_path_buf();
    // The sweeper would race the tests for freshly written files.
    settings.ingestion.sweep_interval = Duration::ZERO;

    let mut db_url = Url::parse(base_database_url)?;
    db_url.set_path(&format!("/{database_name}"));
    settings.secrets.database_url = db_url.to_string();

    Ok((settings, upload_dir))
}

/// Creates an empty database next to the one in `base_database_url` and migrates it.
///
/// Returns the pool for the new database and a pool on the `postgres`
/// maintenance database, which is needed to drop it again.
pub async fn create_test_database(
    base_database_url: &str,
    database_name: &str,
    db_settings: &DatabaseSettings,
) -> Result<(PgPool, PgPool)> {
    let mut management_db_url = Url::parse(base_database_url)?;
    management_db_url.set_path("/postgres");
    let management_pool = get_db_pool(management_db_url.as_str(), db_settings).await?;
    force_drop_db(&management_pool, database_name).await;

    management_pool
        .execute(format!("CREATE DATABASE \"{database_name}\"").as_str())
        .await?;

    let mut test_db_url = Url::parse(base_database_url)?;
    test_db_url.set_path(&format!("/{database_name}"));
    let main_pool = get_db_pool(test_db_url.as_str(), db_settings).await?;

    run_migrations(&main_pool).await?;
    info!("Finished database migrations for {database_name}");

    Ok((main_pool, management_pool))
}

pub async fn force_drop_db(management_pool: &PgPool, db_name: &str) {
    let _ = management_pool
        .execute(format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)").as_str())
        .await;
}

pub fn get_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
