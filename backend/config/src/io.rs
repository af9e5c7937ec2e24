//! Config file loading.

use crate::schema::PermcheckConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "permcheck.yaml";

/// Resolve the permcheck config directory.
/// Priority: `PERMCHECK_CONFIG_DIR` env > `~/.permcheck/` > `./.permcheck/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PERMCHECK_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".permcheck"),
        None => PathBuf::from(".permcheck"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_config(path: &Path) -> Result<PermcheckConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(PermcheckConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: PermcheckConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), checks = config.checks.len(), "Loaded config");
    Ok(config)
}
