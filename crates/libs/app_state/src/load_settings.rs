use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;
use tracing::debug;

/// Load settings from `config/settings.yaml`, overridden by `.env` and `APP__*` variables.
pub fn load_app_settings() -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite the db url from env.
    dotenv::from_path(".env").ok();
    load_settings_from_path(Path::new("config/settings.yaml"), true)
}

/// Load settings from a specific yaml file.
///
/// When `use_env` is false, `APP__*` environment variables are ignored, which keeps
/// test runs independent of the developer's shell.
pub fn load_settings_from_path(path: &Path, use_env: bool) -> Result<AppSettings> {
    let config_path = path.canonicalize()?;
    debug!("Loading settings from {}", config_path.display());

    let mut builder = config::Config::builder().add_source(config::File::from(config_path));
    if use_env {
        builder = builder.add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );
    }

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    AppSettings::try_from(raw_settings)
}
