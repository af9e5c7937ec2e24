//! Human-readable failure messages.
//!
//! The wording is consumed by tooling that parses it, so it must stay stable.

use permcheck_core::ActionDomain;

use crate::evaluator::Verdict;

/// Message for a candidate blocked by a deny rule.
pub fn denied_message<D: ActionDomain>(action: &str, deny_assignment_id: &str) -> String {
    format!(
        "{} {action} denied by deny assignment {deny_assignment_id}.",
        D::LABEL
    )
}

/// Message for a candidate no grant permits.
pub fn unpermitted_message<D: ActionDomain>(action: &str) -> String {
    format!(
        "{} {action} unpermitted because no role assignment permits it.",
        D::LABEL
    )
}

/// All failure messages for a verdict: denials first, then missing grants.
pub fn render_failures<D: ActionDomain>(verdict: &Verdict<D>) -> Vec<String> {
    let denied = verdict
        .denied
        .iter()
        .map(|(action, id)| denied_message::<D>(action, id));
    let unpermitted = verdict
        .unpermitted
        .iter()
        .map(|action| unpermitted_message::<D>(action));
    denied.chain(unpermitted).collect()
}
