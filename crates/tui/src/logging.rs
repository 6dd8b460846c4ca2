use std::{
    fs::{self, OpenOptions},
    sync::Mutex,
};

use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

/// Installs a file-backed subscriber. The terminal belongs to the UI, so
/// nothing is ever logged to stdout/stderr.
pub fn init(config: &AppConfig) -> Result<()> {
    let Some(path) = config.log_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_new(format!(
        "tally={level},engine={level}",
        level = config.log_level
    ))
    .map_err(|err| AppError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}
