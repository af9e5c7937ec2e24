//! Config defaults: applies default values to parsed config.

use crate::schema::{LoggingConfig, PermcheckConfig};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Scope reported for checks that do not name one.
pub const DEFAULT_SCOPE: &str = "/";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: PermcheckConfig) -> PermcheckConfig {
    let config = apply_logging_defaults(config);
    apply_check_defaults(config)
}

fn apply_logging_defaults(mut config: PermcheckConfig) -> PermcheckConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.json.is_none() {
        logging.json = Some(false);
    }
    config
}

fn apply_check_defaults(mut config: PermcheckConfig) -> PermcheckConfig {
    for check in &mut config.checks {
        if check.scope.trim().is_empty() {
            check.scope = DEFAULT_SCOPE.to_string();
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CheckConfig;

    #[test]
    fn fills_logging_and_scope() {
        let config = PermcheckConfig {
            checks: vec![CheckConfig {
                name: "a".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let config = apply_all_defaults(config);
        let logging = config.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("info"));
        assert_eq!(logging.json, Some(false));
        assert_eq!(config.checks[0].scope, "/");
    }

    #[test]
    fn keeps_explicit_level() {
        let config = PermcheckConfig {
            logging: Some(LoggingConfig {
                level: Some("warn".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = apply_all_defaults(config);
        assert_eq!(config.logging.unwrap().level.as_deref(), Some("warn"));
    }
}
