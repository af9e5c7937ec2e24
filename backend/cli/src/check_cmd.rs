//! CLI Check Command
//!
//! Runs configured permission checks against their rule snapshots.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use permcheck_config::{CheckConfig, PermcheckConfig};
use permcheck_evaluator::{run_check, CheckReport, FileRuleSource};
use tracing::error;

use crate::terminal_output::{
    note_error, note_success, note_warn, paint, render_table, Column, GREEN, RED,
};

/// Run every check (or only `only`) and print the results.
///
/// Returns `true` if all selected checks passed.
pub async fn run(
    config: &PermcheckConfig,
    config_path: &Path,
    only: Option<&str>,
    json: bool,
) -> Result<bool> {
    let checks = select_checks(config, only)?;
    if checks.is_empty() {
        note_warn("No checks configured");
        return Ok(true);
    }

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let reports = collect_reports(&checks, base_dir).await;
    let all_passed = reports.iter().all(|r| r.passed);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(&reports);
    }

    Ok(all_passed)
}

/// One report per check, in order. Checks that cannot run are reported as
/// failed with the cause instead of being skipped.
async fn collect_reports(checks: &[&CheckConfig], base_dir: &Path) -> Vec<CheckReport> {
    let mut reports = Vec::with_capacity(checks.len());
    for check in checks {
        let source = FileRuleSource::new(resolve_snapshot(base_dir, &check.snapshot));
        match run_check(&check.name, &check.scope, &check.permissions, &source).await {
            Ok(report) => reports.push(report),
            Err(e) => {
                error!(
                    check = %check.name,
                    error = %format!("{e:#}"),
                    "Permission check could not run"
                );
                reports.push(CheckReport::errored(&check.name, &check.scope, &e));
            }
        }
    }
    reports
}

fn select_checks<'a>(
    config: &'a PermcheckConfig,
    only: Option<&str>,
) -> Result<Vec<&'a CheckConfig>> {
    let Some(name) = only else {
        return Ok(config.checks.iter().collect());
    };
    let selected: Vec<_> = config.checks.iter().filter(|c| c.name == name).collect();
    if selected.is_empty() {
        bail!("No check named '{name}' in config");
    }
    Ok(selected)
}

/// Relative snapshot paths are resolved against the config file's directory.
fn resolve_snapshot(base_dir: &Path, snapshot: &str) -> PathBuf {
    let path = Path::new(snapshot);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn print_reports(reports: &[CheckReport]) {
    let columns = vec![
        Column::left("Check"),
        Column::left("Scope"),
        Column::left("Status"),
        Column::right("Failures"),
    ];
    let rows: Vec<Vec<String>> = reports
        .iter()
        .map(|r| {
            let status = if r.passed {
                paint("PASS", GREEN)
            } else {
                paint("FAIL", RED)
            };
            vec![
                r.name.clone(),
                r.scope.clone(),
                status,
                r.failures.len().to_string(),
            ]
        })
        .collect();
    print!("{}", render_table(&columns, &rows));

    for report in reports {
        if report.passed {
            note_success(&format!("{}: all required permissions held", report.name));
            continue;
        }
        note_error(&format!("{}:", report.name));
        for failure in &report.failures {
            eprintln!("    {failure}");
        }
    }
}
