//! CLI Validate-Config Command

use permcheck_config::{ConfigValidationError, PermcheckConfig, ValidationReport};

use crate::terminal_output::{note_error, note_info, note_success, note_warn};

/// Print the validation report. Returns `true` if the config has no errors.
pub fn run(config: &PermcheckConfig, report: &ValidationReport) -> bool {
    note_info(&format!("{} check(s) configured", config.checks.len()));
    print_findings(report);
    if report.is_valid() {
        note_success("Config is valid");
    }
    report.is_valid()
}

/// Print report warnings and errors as terminal notes.
pub fn print_findings(report: &ValidationReport) {
    for line in finding_lines(&report.warnings) {
        note_warn(&line);
    }
    for line in finding_lines(&report.errors) {
        note_error(&line);
    }
}

fn finding_lines(findings: &[ConfigValidationError]) -> Vec<String> {
    findings
        .iter()
        .map(|f| format!("{}: {}", f.path, f.message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use permcheck_config::{validate, CheckConfig};

    #[test]
    fn check_without_requirements_is_reported() {
        let config = PermcheckConfig {
            checks: vec![CheckConfig {
                name: "noop".to_string(),
                scope: "/".to_string(),
                snapshot: "snap.json".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let report = validate(&config);

        assert!(run(&config, &report));
        assert_eq!(
            finding_lines(&report.warnings),
            vec!["checks[0]: Check requires no actions and always passes".to_string()]
        );
        assert!(finding_lines(&report.errors).is_empty());
    }
}
