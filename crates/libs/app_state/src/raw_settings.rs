use serde::Deserialize;
use std::path::PathBuf;

/// Settings exactly as they appear in `config/settings.yaml` + `APP__*` env overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub ingestion: RawIngestionSettings,
    pub logging: LoggingSettings,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub public_url: String,
    pub allowed_origins: Vec<String>,
    /// Upper bound for a request body, mostly relevant for multipart uploads.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt: String,
    pub database_url: String,
}

/// Database connection pool configuration. Durations are in seconds.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub min_connection: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub access_token_expiry_minutes: i64,
    pub refresh_token_expiry_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawIngestionSettings {
    pub upload_folder: PathBuf,
    pub public_path: String,
    pub max_width: u32,
    pub max_height: u32,
    pub quality: f32,
    pub lossless: bool,
    pub extension: String,
    pub sweep_interval_minutes: u64,
    pub orphan_grace_minutes: u64,
}

/// Logging configuration, used as the default `EnvFilter` directive.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}
