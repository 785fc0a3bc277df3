//! Environment variable parsing with warn-level logging for invalid values.

use crate::constants::{
    DEFAULT_CANDIDATE_LIMIT, DEFAULT_SEARCH_LIMIT, DEFAULT_SIMILARITY_THRESHOLD, MAX_QUERY_LIMIT,
};

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Read a non-empty string variable, treating blank values as unset.
pub fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Search tuning knobs read from the environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    /// Threshold used when a request does not specify one.
    pub default_threshold: f64,
    /// Result count used when a request does not specify one.
    pub default_limit: usize,
    /// Maximum rows fetched for in-process ranking.
    pub candidate_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            default_limit: DEFAULT_SEARCH_LIMIT,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

impl SearchSettings {
    /// Reads `CHATIO_SEARCH_THRESHOLD`, `CHATIO_SEARCH_LIMIT` and `CHATIO_CANDIDATE_LIMIT`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let candidate_limit =
            env_parse_with_default("CHATIO_CANDIDATE_LIMIT", defaults.candidate_limit);
        let capped = candidate_limit.clamp(1, MAX_QUERY_LIMIT);
        if capped != candidate_limit {
            tracing::warn!(
                original = candidate_limit,
                clamped = capped,
                "CHATIO_CANDIDATE_LIMIT clamped to [1, {MAX_QUERY_LIMIT}]"
            );
        }
        Self {
            default_threshold: env_parse_with_default(
                "CHATIO_SEARCH_THRESHOLD",
                defaults.default_threshold,
            ),
            default_limit: env_parse_with_default("CHATIO_SEARCH_LIMIT", defaults.default_limit)
                .min(MAX_QUERY_LIMIT),
            candidate_limit: capped,
        }
    }
}
