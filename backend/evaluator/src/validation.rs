//! Well-formedness checks run once per evaluation, before any matching.

use permcheck_core::{ActionDomain, TokenSource, ValidationError};

use crate::pattern::{has_wildcard, wildcard_count};
use crate::rules::{DenialRule, GrantRule};

/// Validate every candidate and every rule pattern.
///
/// Candidates are checked first, then grants, then denials, each in the
/// order supplied. The first malformed token is reported.
pub fn validate<D: ActionDomain>(
    candidates: &[String],
    grants: &[GrantRule<D>],
    denials: &[DenialRule<D>],
) -> Result<(), ValidationError> {
    for candidate in candidates {
        validate_candidate(candidate)?;
    }
    for grant in grants {
        validate_patterns(&grant.actions, TokenSource::GrantAction)?;
        validate_patterns(&grant.not_actions, TokenSource::GrantNotAction)?;
    }
    for denial in denials {
        validate_patterns(&denial.actions, TokenSource::DenialAction)?;
        validate_patterns(&denial.not_actions, TokenSource::DenialNotAction)?;
    }
    Ok(())
}

/// A candidate must be non-empty and concrete.
pub fn validate_candidate(candidate: &str) -> Result<(), ValidationError> {
    if candidate.is_empty() {
        return Err(ValidationError::EmptyToken {
            origin: TokenSource::CandidateAction,
        });
    }
    if has_wildcard(candidate) {
        return Err(ValidationError::WildcardInCandidate {
            action: candidate.to_string(),
        });
    }
    Ok(())
}

/// A pattern must be non-empty and hold at most one wildcard.
pub fn validate_pattern(pattern: &str, origin: TokenSource) -> Result<(), ValidationError> {
    if pattern.is_empty() {
        return Err(ValidationError::EmptyToken { origin });
    }
    if wildcard_count(pattern) > 1 {
        return Err(ValidationError::TooManyWildcards {
            origin,
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

fn validate_patterns(patterns: &[String], origin: TokenSource) -> Result<(), ValidationError> {
    patterns
        .iter()
        .try_for_each(|pattern| validate_pattern(pattern, origin))
}
