//! Subcommands and the configuration lookup they share.

pub mod batch;
pub mod check;
pub mod config;
pub mod extract;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;
use wasl_core::WaslConfig;

/// Per-user configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wasl")
        .join("config.json")
}

/// The config file a command should read and write.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load the explicit config file, else the per-user file, else defaults.
///
/// An explicitly named file must exist.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<WaslConfig> {
    if let Some(path) = config_path {
        let path = Path::new(path);
        return WaslConfig::from_file(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config {}: {}", path.display(), e)
        });
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config file {}", path.display());
        Ok(WaslConfig::from_file(&path)?)
    } else {
        Ok(WaslConfig::default())
    }
}
