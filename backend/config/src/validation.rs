//! Config validation: schema checks with user-friendly error messages.

use std::collections::HashSet;

use crate::schema::PermcheckConfig;
use thiserror::Error;

/// Log levels accepted in `logging.level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &PermcheckConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_logging(config, &mut report);
    validate_checks(config, &mut report);
    report
}

fn validate_logging(config: &PermcheckConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(level) = &logging.level {
        if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            report.error(
                "logging.level",
                format!("Unknown log level '{level}'. Use one of: {}", LOG_LEVELS.join(", ")),
            );
        }
    }
}

fn validate_checks(config: &PermcheckConfig, report: &mut ValidationReport) {
    if config.checks.is_empty() {
        report.warn("checks", "No checks configured; nothing will be evaluated");
    }

    let mut seen = HashSet::new();
    for (i, check) in config.checks.iter().enumerate() {
        let path = format!("checks[{i}]");
        if check.name.trim().is_empty() {
            report.error(format!("{path}.name"), "Check name cannot be empty");
        } else if !seen.insert(check.name.as_str()) {
            report.error(
                format!("{path}.name"),
                format!("Duplicate check name '{}'", check.name),
            );
        }
        if check.snapshot.trim().is_empty() {
            report.error(format!("{path}.snapshot"), "Snapshot path cannot be empty");
        }

        let permissions = &check.permissions;
        if permissions.actions.is_empty() && permissions.data_actions.is_empty() {
            report.warn(&path, "Check requires no actions and always passes");
        }
        validate_required(&permissions.actions, &format!("{path}.actions"), report);
        validate_required(&permissions.data_actions, &format!("{path}.dataActions"), report);
    }
}

/// Required actions are concrete: non-empty and wildcard-free.
fn validate_required(actions: &[String], path: &str, report: &mut ValidationReport) {
    for (j, action) in actions.iter().enumerate() {
        if action.trim().is_empty() {
            report.error(format!("{path}[{j}]"), "Required action cannot be empty");
        } else if action.contains('*') {
            report.error(
                format!("{path}[{j}]"),
                format!("Required action '{action}' must not contain a wildcard"),
            );
        }
    }
}
