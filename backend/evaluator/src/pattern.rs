//! Single-wildcard action pattern matching.
//!
//! A pattern contains at most one `*`. Depending on where the wildcard sits the
//! pattern is an exact match, a prefix match, a suffix match, or a
//! prefix-and-suffix match.

/// The wildcard character accepted in grant and deny patterns.
pub const WILDCARD: char = '*';

/// Number of wildcard characters in `token`.
pub fn wildcard_count(token: &str) -> usize {
    token.matches(WILDCARD).count()
}

/// Returns true if `token` contains at least one wildcard.
pub fn has_wildcard(token: &str) -> bool {
    token.contains(WILDCARD)
}

/// Returns true if the concrete `candidate` is matched by `pattern`.
///
/// The pattern must hold at most one wildcard; callers validate this first.
pub fn matches(candidate: &str, pattern: &str) -> bool {
    let Some(star) = pattern.find(WILDCARD) else {
        return candidate == pattern;
    };

    let prefix = &pattern[..star];
    let suffix = &pattern[star + WILDCARD.len_utf8()..];

    // `*` alone leaves both halves empty and matches everything.
    candidate.starts_with(prefix) && candidate.ends_with(suffix)
}

/// Returns true if any pattern in `patterns` matches `candidate`.
pub fn matches_any<S: AsRef<str>>(candidate: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|p| matches(candidate, p.as_ref()))
}

/// First pattern in `patterns` matching `candidate`, if any.
pub fn first_match<'a, S: AsRef<str>>(candidate: &str, patterns: &'a [S]) -> Option<&'a str> {
    patterns
        .iter()
        .map(AsRef::as_ref)
        .find(|p| matches(candidate, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_pattern_matches_only_itself() {
        assert!(matches("P/r/sr/a", "P/r/sr/a"));
        assert!(!matches("P/r/sr/ab", "P/r/sr/a"));
        assert!(!matches("P/r/sr", "P/r/sr/a"));
    }

    #[test]
    fn lone_wildcard_matches_everything() {
        assert!(matches("P/r/sr/a", "*"));
        assert!(matches("x", "*"));
    }

    #[test]
    fn trailing_wildcard_is_prefix_match() {
        assert!(matches("P/r/sr/a", "P/r/sr/*"));
        assert!(matches("P/r/sr/", "P/r/sr/*"));
        assert!(!matches("P/r/other/a", "P/r/sr/*"));
    }

    #[test]
    fn leading_wildcard_is_suffix_match() {
        assert!(matches("P/r/sr/read", "*/read"));
        assert!(!matches("P/r/sr/write", "*/read"));
    }

    #[test]
    fn interior_wildcard_needs_prefix_and_suffix() {
        assert!(matches("P/r/sr/read", "P/*/read"));
        assert!(!matches("P/r/sr/write", "P/*/read"));
        assert!(!matches("Q/r/sr/read", "P/*/read"));
    }

    #[test]
    fn interior_wildcard_allows_overlap() {
        // Prefix "ab" and suffix "ba" overlap on the shared 'b'.
        assert!(matches("aba", "ab*ba"));
        assert!(!matches("ab", "ab*ba"));
    }

    #[test]
    fn wildcard_helpers() {
        assert_eq!(wildcard_count("P/*/r/*"), 2);
        assert_eq!(wildcard_count("P/r"), 0);
        assert!(has_wildcard("*"));
        assert!(!has_wildcard("P/r"));
    }

    #[test]
    fn first_match_reports_pattern() {
        let patterns = vec!["Q/*".to_string(), "P/*".to_string(), "*".to_string()];
        assert_eq!(first_match("P/r", &patterns), Some("P/*"));
        assert!(matches_any("Z", &patterns));
        assert_eq!(first_match::<&str>("P/r", &[]), None);
    }
}
