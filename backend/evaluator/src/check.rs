//! Checking a full permission set against a rule snapshot.

use chrono::{DateTime, Utc};
use permcheck_core::{
    ActionDomain, CheckError, Control, Data, PermissionSet, RuleSnapshot, RuleSource,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::evaluator::{evaluate, Verdict};
use crate::report::render_failures;
use crate::rules::{denial_rules, grant_rules};

/// Verdicts for both action domains of one permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCheck {
    pub control: Verdict<Control>,
    pub data: Verdict<Data>,
}

impl PermissionCheck {
    pub fn passed(&self) -> bool {
        self.control.is_clean() && self.data.is_clean()
    }

    /// Control-plane failures followed by data-plane failures.
    pub fn failures(&self) -> Vec<String> {
        let mut failures = render_failures(&self.control);
        failures.extend(render_failures(&self.data));
        failures
    }
}

/// Serializable outcome of one named check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub name: String,
    pub scope: String,
    pub passed: bool,
    #[serde(default)]
    pub failures: Vec<String>,
    pub checked_at: DateTime<Utc>,
}

impl CheckReport {
    pub fn new(name: impl Into<String>, scope: impl Into<String>, check: &PermissionCheck) -> Self {
        Self {
            name: name.into(),
            scope: scope.into(),
            passed: check.passed(),
            failures: check.failures(),
            checked_at: Utc::now(),
        }
    }

    /// Report for a check that could not be evaluated at all.
    pub fn errored(
        name: impl Into<String>,
        scope: impl Into<String>,
        error: &anyhow::Error,
    ) -> Self {
        Self {
            name: name.into(),
            scope: scope.into(),
            passed: false,
            failures: vec![format!("Check could not run: {error:#}")],
            checked_at: Utc::now(),
        }
    }
}

/// Evaluate both domains of `set` against `snapshot`.
pub fn check_permission_set(
    set: &PermissionSet,
    snapshot: &RuleSnapshot,
) -> Result<PermissionCheck, CheckError> {
    Ok(PermissionCheck {
        control: check_domain::<Control>(set, snapshot)?,
        data: check_domain::<Data>(set, snapshot)?,
    })
}

fn check_domain<D: ActionDomain>(
    set: &PermissionSet,
    snapshot: &RuleSnapshot,
) -> Result<Verdict<D>, CheckError> {
    let grants = grant_rules::<D>(&snapshot.role_assignments)?;
    let denials = denial_rules::<D>(&snapshot.deny_assignments)?;
    Ok(evaluate(D::required(set), &grants, &denials)?)
}

/// Fetch the rules for `scope` from `source` and check `set` against them.
pub async fn run_check(
    name: &str,
    scope: &str,
    set: &PermissionSet,
    source: &dyn RuleSource,
) -> anyhow::Result<CheckReport> {
    let snapshot = source.fetch(scope).await?;
    let check = check_permission_set(set, &snapshot)?;
    let report = CheckReport::new(name, scope, &check);

    if report.passed {
        info!(check = %name, scope = %scope, source = source.name(), "Permission check passed");
    } else {
        warn!(
            check = %name,
            scope = %scope,
            failures = report.failures.len(),
            "Permission check failed"
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use permcheck_core::AdaptError;
    use serde_json::json;

    fn snapshot() -> RuleSnapshot {
        serde_json::from_value(json!({
            "roleAssignments": [{
                "id": "ra-1",
                "permissions": [{
                    "actions": ["P/r/*"],
                    "notActions": ["P/r/delete"],
                    "dataActions": ["P/r/blobs/read"],
                    "notDataActions": []
                }]
            }],
            "denyAssignments": [{
                "id": "d1",
                "permissions": [{
                    "actions": ["P/r/write"],
                    "notActions": [],
                    "dataActions": [],
                    "notDataActions": []
                }]
            }]
        }))
        .unwrap()
    }

    fn set(actions: &[&str], data_actions: &[&str]) -> PermissionSet {
        PermissionSet {
            actions: actions.iter().map(|s| s.to_string()).collect(),
            data_actions: data_actions.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn satisfied_set_passes() {
        let check = check_permission_set(&set(&["P/r/read"], &["P/r/blobs/read"]), &snapshot())
            .unwrap();
        assert!(check.passed());
        assert!(check.failures().is_empty());
    }

    #[test]
    fn failures_cover_both_domains() {
        let check = check_permission_set(
            &set(&["P/r/write", "P/r/delete"], &["P/r/blobs/write"]),
            &snapshot(),
        )
        .unwrap();
        assert!(!check.passed());
        assert_eq!(
            check.failures(),
            vec![
                "Action P/r/write denied by deny assignment d1.".to_string(),
                "Action P/r/delete unpermitted because no role assignment permits it.".to_string(),
                "DataAction P/r/blobs/write unpermitted because no role assignment permits it."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn malformed_snapshot_is_a_check_error() {
        let mut snapshot = snapshot();
        snapshot.deny_assignments[0].id = None;
        let err = check_permission_set(&set(&["P/r/read"], &[]), &snapshot).unwrap_err();
        assert!(matches!(err, CheckError::Adapt(_)));
    }

    #[test]
    fn wildcard_requirement_is_a_check_error() {
        let err = check_permission_set(&set(&["P/r/*"], &[]), &snapshot()).unwrap_err();
        assert!(matches!(err, CheckError::Validation(_)));
    }

    #[test]
    fn report_serializes_camel_case() {
        let check = check_permission_set(&set(&["P/r/read"], &[]), &snapshot()).unwrap();
        let report = CheckReport::new("reader", "/subscriptions/s1", &check);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["passed"], true);
        assert!(value.get("checkedAt").is_some());
    }

    #[test]
    fn errored_report_fails_with_the_cause() {
        let err = anyhow::Error::from(AdaptError::MissingField {
            record: "deny assignment #0".to_string(),
            field: "id",
        })
        .context("snapshot for reader");
        let report = CheckReport::errored("reader", "/", &err);
        assert!(!report.passed);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].starts_with("Check could not run: snapshot for reader"));
        assert!(report.failures[0].contains("missing required field 'id'"));
    }
}
