use crate::runner::context::utils::{create_test_database, create_test_settings, force_drop_db};
use app_state::AppSettings;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::utils::random_base36;
use sqlx::PgPool;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Env var holding a Postgres URL the suite may create databases next to.
pub const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";

/// A running API with its own database and upload folder.
pub struct TestContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub http_client: reqwest::Client,
    db_name: String,
    management_pool: PgPool,
    _upload_dir: TempDir,
    api_handle: JoinHandle<()>,
}

impl TestContext {
    /// Starts the environment, or returns `None` when no test database is configured.
    pub async fn new() -> Result<Option<Self>> {
        let Ok(base_database_url) = std::env::var(TEST_DATABASE_URL) else {
            return Ok(None);
        };
        info!("Setting up test environment...");

        let database_name = format!("event_gallery_test_{}", random_base36(8));
        let (settings, upload_dir) = create_test_settings(&base_database_url, &database_name)?;
        let (pool, management_pool) =
            create_test_database(&base_database_url, &database_name, &settings.database).await?;

        let api_pool = pool.clone();
        let api_settings = settings.clone();
        let api_handle = tokio::spawn(async move {
            if let Err(e) = api::serve(api_pool, api_settings).await {
                error!("API server failed: {e:?}");
            }
        });

        let context = Self {
            pool,
            settings,
            http_client: reqwest::Client::new(),
            db_name: database_name,
            management_pool,
            _upload_dir: upload_dir,
            api_handle,
        };
        context.wait_until_healthy().await?;
        info!("Test environment is ready.");

        Ok(Some(context))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.settings.api.public_url)
    }

    async fn wait_until_healthy(&self) -> Result<()> {
        for _ in 0..50 {
            if let Ok(response) = self.http_client.get(self.url("/health")).send().await
                && response.status().is_success()
            {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        Err(eyre!("API did not become healthy at {}", self.settings.api.public_url))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        info!("Tearing down test environment...");
        self.api_handle.abort();

        let db_name = self.db_name.clone();
        let pool = self.management_pool.clone();
        tokio::spawn(async move {
            info!("Dropping test database: {db_name}");
            force_drop_db(&pool, &db_name).await;
        });
    }
}
