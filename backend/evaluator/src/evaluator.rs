//! Permission evaluation.
//!
//! Every candidate goes through two independent passes. The denial pass finds
//! the deny rule that blocks the candidate; when several do, the last one in
//! rule order is reported. The grant pass looks for any single grant whose
//! actions match the candidate and whose own exceptions do not.

use std::collections::{BTreeMap, BTreeSet};
use std::marker::PhantomData;

use permcheck_core::{ActionDomain, ValidationError};
use tracing::debug;

use crate::pattern::{first_match, matches_any};
use crate::rules::{DenialRule, GrantRule};
use crate::validation::validate;

/// Outcome of evaluating a batch of candidates in one action domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict<D: ActionDomain> {
    /// Denied candidates and the id of the deny rule blocking each.
    pub denied: BTreeMap<String, String>,
    /// Candidates no grant permits.
    pub unpermitted: BTreeSet<String>,
    _domain: PhantomData<D>,
}

impl<D: ActionDomain> Default for Verdict<D> {
    fn default() -> Self {
        Self {
            denied: BTreeMap::new(),
            unpermitted: BTreeSet::new(),
            _domain: PhantomData,
        }
    }
}

impl<D: ActionDomain> Verdict<D> {
    /// True when nothing is denied and everything is granted.
    pub fn is_clean(&self) -> bool {
        self.denied.is_empty() && self.unpermitted.is_empty()
    }

    /// Id of the deny rule blocking `action`, if any.
    pub fn denied_by(&self, action: &str) -> Option<&str> {
        self.denied.get(action).map(String::as_str)
    }

    pub fn is_unpermitted(&self, action: &str) -> bool {
        self.unpermitted.contains(action)
    }
}

/// Evaluates candidates against a borrowed set of grant and deny rules.
#[derive(Debug, Clone, Copy)]
pub struct PermissionEvaluator<'a, D: ActionDomain> {
    grants: &'a [GrantRule<D>],
    denials: &'a [DenialRule<D>],
}

impl<'a, D: ActionDomain> PermissionEvaluator<'a, D> {
    pub fn new(grants: &'a [GrantRule<D>], denials: &'a [DenialRule<D>]) -> Self {
        Self { grants, denials }
    }

    /// Validate the input, then classify every candidate.
    pub fn evaluate(&self, candidates: &[String]) -> Result<Verdict<D>, ValidationError> {
        validate(candidates, self.grants, self.denials)?;

        let mut verdict = Verdict::<D> {
            unpermitted: candidates.iter().cloned().collect(),
            ..Default::default()
        };

        for candidate in candidates {
            if let Some(id) = self.denying_rule(candidate) {
                verdict.denied.insert(candidate.clone(), id.to_string());
            }
            if self.is_granted(candidate) {
                verdict.unpermitted.remove(candidate);
            }
        }

        debug!(
            domain = D::LABEL,
            candidates = candidates.len(),
            denied = verdict.denied.len(),
            unpermitted = verdict.unpermitted.len(),
            "Evaluated permissions"
        );
        Ok(verdict)
    }

    /// Id of the last deny rule that applies to `candidate`.
    fn denying_rule(&self, candidate: &str) -> Option<&'a str> {
        let mut denied_by = None;
        for rule in self.denials {
            if matches_any(candidate, &rule.not_actions) {
                continue;
            }
            if let Some(pattern) = first_match(candidate, &rule.actions) {
                debug!(
                    action = %candidate,
                    pattern = %pattern,
                    deny_assignment = %rule.id,
                    "Deny rule match"
                );
                denied_by = Some(rule.id.as_str());
            }
        }
        denied_by
    }

    fn is_granted(&self, candidate: &str) -> bool {
        for grant in self.grants {
            if matches_any(candidate, &grant.not_actions) {
                continue;
            }
            if let Some(pattern) = first_match(candidate, &grant.actions) {
                debug!(action = %candidate, pattern = %pattern, "Grant match");
                return true;
            }
        }
        false
    }
}

/// Evaluate `candidates` against `grants` and `denials`.
pub fn evaluate<D: ActionDomain>(
    candidates: &[String],
    grants: &[GrantRule<D>],
    denials: &[DenialRule<D>],
) -> Result<Verdict<D>, ValidationError> {
    PermissionEvaluator::new(grants, denials).evaluate(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use permcheck_core::{Control, Data, TokenSource};

    fn actions(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn no_patterns() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn wildcard_grant_permits_candidate() {
        let grants = vec![GrantRule::<Control>::new(["P/r/sr/*"], no_patterns())];
        let verdict = evaluate(&actions(&["P/r/sr/a"]), &grants, &[]).unwrap();
        assert!(verdict.denied.is_empty());
        assert!(verdict.unpermitted.is_empty());
        assert!(verdict.is_clean());
    }

    #[test]
    fn deny_rule_is_attributed_while_grant_still_applies() {
        let grants = vec![GrantRule::<Control>::new(["P/r/sr/*"], no_patterns())];
        let denials = vec![DenialRule::<Control>::new("d1", ["P/r/sr/a"], no_patterns())];
        let verdict = evaluate(&actions(&["P/r/sr/a", "P/r/sr/b"]), &grants, &denials).unwrap();
        assert_eq!(verdict.denied.len(), 1);
        assert_eq!(verdict.denied_by("P/r/sr/a"), Some("d1"));
        assert!(verdict.unpermitted.is_empty());
    }

    #[test]
    fn nothing_granted_means_unpermitted() {
        let verdict = evaluate::<Control>(&actions(&["P/r/sr/a"]), &[], &[]).unwrap();
        assert!(verdict.denied.is_empty());
        assert!(verdict.is_unpermitted("P/r/sr/a"));
    }

    #[test]
    fn grant_exception_cancels_its_own_action() {
        let grants = vec![GrantRule::<Control>::new(["P/r/sr/a"], ["P/r/sr/a"])];
        let verdict = evaluate(&actions(&["P/r/sr/a"]), &grants, &[]).unwrap();
        assert_eq!(verdict.unpermitted, BTreeSet::from(["P/r/sr/a".to_string()]));
    }

    #[test]
    fn empty_candidate_fails_validation() {
        let err = evaluate::<Control>(&actions(&[""]), &[], &[]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyToken {
                origin: TokenSource::CandidateAction
            }
        );
    }

    #[test]
    fn wildcard_candidate_fails_validation() {
        let err = evaluate::<Control>(&actions(&["*"]), &[], &[]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WildcardInCandidate {
                action: "*".to_string()
            }
        );
    }

    #[test]
    fn empty_candidate_list_yields_empty_verdict() {
        let grants = vec![GrantRule::<Data>::new(["*"], no_patterns())];
        let denials = vec![DenialRule::<Data>::new("d1", ["*"], no_patterns())];
        let verdict = evaluate(&[], &grants, &denials).unwrap();
        assert_eq!(verdict, Verdict::default());
    }

    #[test]
    fn excluded_grant_falls_through_to_next_grant() {
        let grants = vec![
            GrantRule::<Control>::new(["P/*"], ["P/r/delete"]),
            GrantRule::<Control>::new(["P/r/delete"], no_patterns()),
        ];
        let verdict = evaluate(&actions(&["P/r/delete"]), &grants, &[]).unwrap();
        assert!(verdict.unpermitted.is_empty());
    }

    #[test]
    fn exception_in_another_grant_does_not_revoke() {
        let grants = vec![
            GrantRule::<Control>::new(["P/r/read"], no_patterns()),
            GrantRule::<Control>::new(["Q/*"], ["P/r/read"]),
        ];
        let verdict = evaluate(&actions(&["P/r/read"]), &grants, &[]).unwrap();
        assert!(verdict.unpermitted.is_empty());
    }

    #[test]
    fn last_matching_deny_rule_wins() {
        let denials = vec![
            DenialRule::<Control>::new("d1", ["P/*"], no_patterns()),
            DenialRule::<Control>::new("d2", ["*/a"], no_patterns()),
            DenialRule::<Control>::new("d3", ["Q/*"], no_patterns()),
        ];
        let verdict = evaluate(&actions(&["P/r/a"]), &[], &denials).unwrap();
        assert_eq!(verdict.denied_by("P/r/a"), Some("d2"));
    }

    #[test]
    fn deny_exception_skips_only_that_rule() {
        let denials = vec![
            DenialRule::<Control>::new("d1", ["P/*"], no_patterns()),
            DenialRule::<Control>::new("d2", ["*"], ["P/r/a"]),
        ];
        let verdict = evaluate(&actions(&["P/r/a", "P/r/b"]), &[], &denials).unwrap();
        assert_eq!(verdict.denied_by("P/r/a"), Some("d1"));
        assert_eq!(verdict.denied_by("P/r/b"), Some("d2"));
    }

    #[test]
    fn denied_and_unpermitted_are_independent() {
        let denials = vec![DenialRule::<Data>::new("d9", ["P/blobs/*"], no_patterns())];
        let verdict = evaluate(&actions(&["P/blobs/read"]), &[], &denials).unwrap();
        assert_eq!(verdict.denied_by("P/blobs/read"), Some("d9"));
        assert!(verdict.is_unpermitted("P/blobs/read"));
    }

    #[test]
    fn evaluation_is_repeatable_and_order_independent() {
        let grants = vec![GrantRule::<Control>::new(["P/r/*"], ["P/r/x"])];
        let denials = vec![DenialRule::<Control>::new("d1", ["*/y"], no_patterns())];
        let evaluator = PermissionEvaluator::new(&grants, &denials);

        let forward = evaluator.evaluate(&actions(&["P/r/x", "P/r/y", "P/r/z"])).unwrap();
        let again = evaluator.evaluate(&actions(&["P/r/x", "P/r/y", "P/r/z"])).unwrap();
        let reversed = evaluator.evaluate(&actions(&["P/r/z", "P/r/y", "P/r/x"])).unwrap();

        assert_eq!(forward, again);
        assert_eq!(forward, reversed);
        assert!(forward.is_unpermitted("P/r/x"));
        assert_eq!(forward.denied_by("P/r/y"), Some("d1"));
    }

    #[test]
    fn malformed_rule_aborts_whole_batch() {
        let grants = vec![
            GrantRule::<Control>::new(["P/*"], no_patterns()),
            GrantRule::<Control>::new(["P/*/*"], no_patterns()),
        ];
        let result = evaluate(&actions(&["P/r/a"]), &grants, &[]);
        assert!(matches!(
            result,
            Err(ValidationError::TooManyWildcards {
                origin: TokenSource::GrantAction,
                ..
            })
        ));
    }
}
