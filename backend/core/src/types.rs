//! Raw rule records as delivered by the authorization service, and the
//! permission requirements checked against them.

use serde::{Deserialize, Serialize};

/// One permission block of a role definition or deny assignment.
///
/// Every list is optional on the wire. A missing list is rejected during
/// adaptation; an empty list is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    #[serde(default)]
    pub actions: Option<Vec<String>>,
    #[serde(default)]
    pub not_actions: Option<Vec<String>>,
    #[serde(default)]
    pub data_actions: Option<Vec<String>>,
    #[serde(default)]
    pub not_data_actions: Option<Vec<String>>,
}

impl PermissionRecord {
    /// A record with every list present and empty.
    pub fn empty() -> Self {
        Self {
            actions: Some(Vec::new()),
            not_actions: Some(Vec::new()),
            data_actions: Some(Vec::new()),
            not_data_actions: Some(Vec::new()),
        }
    }
}

/// A role held by the principal, flattened to its role definition's permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_definition_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<PermissionRecord>>,
}

/// An explicit deny record applying to the principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenyAssignmentRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny_assignment_name: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<PermissionRecord>>,
}

/// Fully materialized rules for one principal at one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSnapshot {
    #[serde(default)]
    pub role_assignments: Vec<RoleAssignmentRecord>,
    #[serde(default)]
    pub deny_assignments: Vec<DenyAssignmentRecord>,
}

/// Concrete actions the principal is required to hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub data_actions: Vec<String>,
}
