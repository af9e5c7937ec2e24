//! CLI Match Command
//!
//! Tests a single action against a single grant/deny pattern, for debugging
//! rule authoring.

use anyhow::Result;
use permcheck_core::TokenSource;
use permcheck_evaluator::{matches, validate_candidate, validate_pattern};

use crate::terminal_output::{note_info, note_success};

/// Returns `true` if `pattern` matches `action`.
pub fn run(action: &str, pattern: &str) -> Result<bool> {
    validate_candidate(action)?;
    validate_pattern(pattern, TokenSource::GrantAction)?;

    let matched = matches(action, pattern);
    if matched {
        note_success(&format!("{pattern} matches {action}"));
    } else {
        note_info(&format!("{pattern} does not match {action}"));
    }
    Ok(matched)
}
