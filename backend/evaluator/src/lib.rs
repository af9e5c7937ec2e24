//! `permcheck-evaluator` — decides whether a principal holds a set of
//! concrete permissions, given its role grants and deny rules.
//!
//! Provides:
//! - Single-wildcard pattern matching
//! - Input validation that rejects malformed tokens before evaluation
//! - Independent denial and grant passes with deny-rule attribution
//! - Adaptation of raw assignment records into domain-typed rules
//! - Stable failure messages and a file-backed rule source

pub mod check;
pub mod evaluator;
pub mod pattern;
pub mod report;
pub mod rules;
pub mod source;
pub mod validation;

pub use check::{check_permission_set, run_check, CheckReport, PermissionCheck};
pub use evaluator::{evaluate, PermissionEvaluator, Verdict};
pub use pattern::{has_wildcard, matches, matches_any, wildcard_count, WILDCARD};
pub use report::{denied_message, render_failures, unpermitted_message};
pub use rules::{denial_rules, grant_rules, DenialRule, GrantRule};
pub use source::FileRuleSource;
pub use validation::{validate, validate_candidate, validate_pattern};
