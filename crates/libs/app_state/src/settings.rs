use crate::{
    ApiSettings, AuthSettings, DatabaseSettings, LoggingSettings, RawSettings, SecretSettings,
};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use std::path::{PathBuf, absolute};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub ingestion: IngestionSettings,
    pub logging: LoggingSettings,
}

/// Image ingestion settings with the upload folder resolved to an absolute path.
#[derive(Debug, Clone)]
pub struct IngestionSettings {
    pub upload_root: PathBuf,
    /// URL prefix the upload folder is served under, without trailing slash.
    pub public_path: String,
    pub max_width: u32,
    pub max_height: u32,
    pub quality: f32,
    pub lossless: bool,
    pub extension: String,
    pub sweep_interval: Duration,
    pub orphan_grace: Duration,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = color_eyre::Report;

    fn try_from(raw: RawSettings) -> Result<Self> {
        let upload_root = absolute(&raw.ingestion.upload_folder)
            .wrap_err("Invalid ingestion.upload_folder")?;

        let public_path = raw.ingestion.public_path.trim_end_matches('/').to_owned();
        if !public_path.starts_with('/') {
            return Err(eyre!(
                "ingestion.public_path must start with '/', got {public_path:?}"
            ));
        }
        if raw.ingestion.max_width == 0 || raw.ingestion.max_height == 0 {
            return Err(eyre!("ingestion.max_width and max_height must be positive"));
        }
        if !(0.0..=100.0).contains(&raw.ingestion.quality) {
            return Err(eyre!("ingestion.quality must be within 0..=100"));
        }

        let ingestion = IngestionSettings {
            upload_root,
            public_path,
            max_width: raw.ingestion.max_width,
            max_height: raw.ingestion.max_height,
            quality: raw.ingestion.quality,
            lossless: raw.ingestion.lossless,
            extension: raw.ingestion.extension.trim_start_matches('.').to_lowercase(),
            sweep_interval: Duration::from_secs(raw.ingestion.sweep_interval_minutes * 60),
            orphan_grace: Duration::from_secs(raw.ingestion.orphan_grace_minutes * 60),
        };

        Ok(Self {
            api: raw.api,
            secrets: raw.secrets,
            database: raw.database,
            auth: raw.auth,
            ingestion,
            logging: raw.logging,
        })
    }
}

impl IngestionSettings {
    /// Directory that holds every image of one event.
    #[must_use]
    pub fn event_dir(&self, slug: &str) -> PathBuf {
        self.upload_root.join(slug)
    }

    /// Public URL for a stored file.
    #[must_use]
    pub fn public_url(&self, slug: &str, filename: &str) -> String {
        format!("{}/{slug}/{filename}", self.public_path)
    }
}
