//! Pattern validation for text attributes.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use regex::Regex;

/// Process-wide cache of compiled patterns.
///
/// Attribute patterns are static strings repeated across every write, so each
/// one is compiled at most once for the lifetime of the process.
fn compiled() -> &'static RwLock<HashMap<&'static str, Regex>> {
    static CACHE: OnceLock<RwLock<HashMap<&'static str, Regex>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Check whether `value` matches `pattern`.
///
/// An invalid pattern logs a warning and counts as a non-match rather than
/// panicking; validation has to stay resilient at write time.
#[must_use]
pub fn matches_pattern(value: &str, pattern: &'static str) -> bool {
    {
        let cache = compiled().read().unwrap();
        if let Some(regex) = cache.get(pattern) {
            return regex.is_match(value);
        }
    }

    match Regex::new(pattern) {
        Ok(regex) => {
            let matched = regex.is_match(value);
            compiled().write().unwrap().insert(pattern, regex);
            matched
        }
        Err(e) => {
            tracing::warn!(
                pattern = pattern,
                error = %e,
                "Invalid attribute pattern, treating as non-match"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_simple_pattern() {
        assert!(matches_pattern("abc-123", r"^[a-z]+-\d+$"));
        assert!(!matches_pattern("abc123", r"^[a-z]+-\d+$"));
    }

    #[test]
    fn test_invalid_pattern_is_non_match() {
        assert!(!matches_pattern("anything", r"(unclosed"));
    }

    #[test]
    fn test_cached_pattern_still_matches() {
        let pattern = r"^\d{4}$";
        assert!(matches_pattern("2026", pattern));
        // Second call hits the cache.
        assert!(matches_pattern("2027", pattern));
        assert!(!matches_pattern("202", pattern));
    }
}
