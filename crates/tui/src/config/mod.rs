use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tally.toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the expense store and the log file.
    pub data_dir: String,
    /// Store key the ledger is persisted under.
    pub storage_key: String,
    pub log_level: String,
    /// Log file name relative to `data_dir`. Empty disables logging.
    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            storage_key: engine::DEFAULT_STORAGE_KEY.to_string(),
            log_level: "info".to_string(),
            log_file: "tally.log".to_string(),
        }
    }
}

impl AppConfig {
    pub fn log_path(&self) -> Option<PathBuf> {
        let file = self.log_file.trim();
        if file.is_empty() {
            return None;
        }
        Some(PathBuf::from(&self.data_dir).join(file))
    }
}

#[derive(Debug, Parser)]
#[command(name = "tally", about = "Personal expense tracker")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the data directory.
    #[arg(long)]
    data_dir: Option<String>,
    /// Override the storage key.
    #[arg(long)]
    storage_key: Option<String>,
    /// Override the log level (e.g. debug, info, warn).
    #[arg(long)]
    log_level: Option<String>,
    /// Override the log file name (empty string disables logging).
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    resolve(Args::parse())
}

fn resolve(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("TALLY"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_dir) = args.data_dir {
        settings.data_dir = data_dir;
    }
    if let Some(storage_key) = args.storage_key {
        settings.storage_key = storage_key;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let args = Args::parse_from(["tally", "--config", "does/not/exist.toml"]);
        let settings = resolve(args).unwrap();
        assert_eq!(settings.storage_key, "expenses");
        assert_eq!(settings.log_path(), Some(PathBuf::from("data/tally.log")));
    }

    #[test]
    fn flags_override_file_values() {
        let args = Args::parse_from([
            "tally",
            "--config",
            "does/not/exist.toml",
            "--data-dir",
            "/tmp/tally",
            "--storage-key",
            "work",
            "--log-file",
            "",
        ]);
        let settings = resolve(args).unwrap();
        assert_eq!(settings.data_dir, "/tmp/tally");
        assert_eq!(settings.storage_key, "work");
        assert_eq!(settings.log_path(), None);
    }
}
