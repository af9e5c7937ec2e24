//! `permcheck-config` — permcheck configuration management.
//!
//! Provides:
//! - Typed config schema (logging, permission checks)
//! - YAML loading
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Schema validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config};
pub use schema::{CheckConfig, LoggingConfig, PermcheckConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load, apply env substitution, apply defaults, and validate a config file.
///
/// This is the main entry point for loading a config at runtime. The
/// validation report is returned alongside the config so callers decide
/// whether errors are fatal and when to log it (see [`log_report`]).
pub async fn load_and_prepare(path: &Path) -> Result<(PermcheckConfig, ValidationReport)> {
    let raw_config = load_config(path).await?;

    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;

    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;

    let config: PermcheckConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_all_defaults(config);

    let report = validate(&config);
    Ok((config, report))
}

/// Emit every report entry as a `tracing` event.
///
/// Separate from [`load_and_prepare`] because the logger is configured from
/// the loaded config and only exists afterwards.
pub fn log_report(report: &ValidationReport) {
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn prepares_config_from_yaml() {
        let path = std::env::temp_dir().join(format!(
            "permcheck-prepare-{}.yaml",
            std::process::id()
        ));
        let yaml = "checks:\n  - name: reader\n    snapshot: snap.json\n    actions: [P/r/read]\n";
        tokio::fs::write(&path, yaml).await.unwrap();

        let (config, report) = load_and_prepare(&path).await.unwrap();
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert_eq!(config.checks[0].scope, "/");
        assert_eq!(
            config.logging.and_then(|l| l.level).as_deref(),
            Some("info")
        );

        let _ = tokio::fs::remove_file(&path).await;
    }
}
