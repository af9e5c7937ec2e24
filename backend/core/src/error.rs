use std::fmt;

use thiserror::Error;

/// Which input list a malformed token was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    CandidateAction,
    GrantAction,
    GrantNotAction,
    DenialAction,
    DenialNotAction,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenSource::CandidateAction => "candidate action",
            TokenSource::GrantAction => "grant action",
            TokenSource::GrantNotAction => "grant not-action",
            TokenSource::DenialAction => "denial action",
            TokenSource::DenialNotAction => "denial not-action",
        };
        f.write_str(s)
    }
}

/// Malformed evaluator input. Raised before any matching happens and aborts
/// the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{origin} must not be empty")]
    EmptyToken { origin: TokenSource },

    #[error("candidate action {action:?} must not contain a wildcard")]
    WildcardInCandidate { action: String },

    #[error("{origin} {pattern:?} contains more than one wildcard")]
    TooManyWildcards { origin: TokenSource, pattern: String },
}

/// Raw rule records that cannot be turned into evaluator rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdaptError {
    #[error("{record} is missing required field '{field}'")]
    MissingField { record: String, field: &'static str },
}

/// Failure of a full permission-set check.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("rule snapshot rejected: {0}")]
    Adapt(#[from] AdaptError),

    #[error("invalid evaluator input: {0}")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_names_its_list() {
        let err = ValidationError::EmptyToken {
            origin: TokenSource::DenialNotAction,
        };
        assert_eq!(err.to_string(), "denial not-action must not be empty");
    }

    #[test]
    fn check_error_wraps_adapt_error() {
        let err: CheckError = AdaptError::MissingField {
            record: "deny assignment #0".to_string(),
            field: "id",
        }
        .into();
        assert!(err.to_string().contains("missing required field 'id'"));
    }
}
