//! Action domains.
//!
//! Control-plane actions and data actions live in separate namespaces but are
//! evaluated by the same algorithm. Each domain is a zero-sized marker type;
//! rules and verdicts carry it as a type parameter so that rules for one
//! domain are never matched against candidates of the other.

use std::fmt::Debug;

use crate::types::{PermissionRecord, PermissionSet};

/// A namespace of action identifiers.
pub trait ActionDomain: Debug + Clone + Copy + Default + Send + Sync + 'static {
    /// Prefix used in human-readable failure messages.
    const LABEL: &'static str;

    /// Record field holding the permitted patterns for this domain.
    const ACTIONS_FIELD: &'static str;

    /// Record field holding the excluded patterns for this domain.
    const NOT_ACTIONS_FIELD: &'static str;

    fn actions(record: &PermissionRecord) -> Option<&[String]>;

    fn not_actions(record: &PermissionRecord) -> Option<&[String]>;

    /// The required actions of this domain in a permission set.
    fn required(set: &PermissionSet) -> &[String];
}

/// Control-plane (management) actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Control;

/// Data actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Data;

impl ActionDomain for Control {
    const LABEL: &'static str = "Action";
    const ACTIONS_FIELD: &'static str = "actions";
    const NOT_ACTIONS_FIELD: &'static str = "notActions";

    fn actions(record: &PermissionRecord) -> Option<&[String]> {
        record.actions.as_deref()
    }

    fn not_actions(record: &PermissionRecord) -> Option<&[String]> {
        record.not_actions.as_deref()
    }

    fn required(set: &PermissionSet) -> &[String] {
        &set.actions
    }
}

impl ActionDomain for Data {
    const LABEL: &'static str = "DataAction";
    const ACTIONS_FIELD: &'static str = "dataActions";
    const NOT_ACTIONS_FIELD: &'static str = "notDataActions";

    fn actions(record: &PermissionRecord) -> Option<&[String]> {
        record.data_actions.as_deref()
    }

    fn not_actions(record: &PermissionRecord) -> Option<&[String]> {
        record.not_data_actions.as_deref()
    }

    fn required(set: &PermissionSet) -> &[String] {
        &set.data_actions
    }
}
