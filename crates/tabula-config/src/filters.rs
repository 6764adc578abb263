//! Ignore filters
//!
//! An ordered list of regex patterns excluding documents from every source
//! strategy uniformly. A path is excluded when any non-empty pattern matches
//! anywhere in it (search semantics, not a full match). Patterns are
//! compiled once at construction; an invalid pattern is a configuration
//! error rather than a silent no-op.

use crate::error::{ConfigError, ConfigResult};
use regex::Regex;

/// Compiled set of exclusion patterns
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilters {
    patterns: Vec<Regex>,
}

impl IgnoreFilters {
    /// Compile a pattern list; empty patterns are skipped
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> ConfigResult<Self> {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.is_empty() {
                continue;
            }
            compiled.push(Regex::new(pattern).map_err(|source| {
                ConfigError::InvalidIgnorePattern {
                    pattern: pattern.to_string(),
                    source,
                }
            })?);
        }
        Ok(Self { patterns: compiled })
    }

    /// Filter set that excludes nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the given document path is excluded
    pub fn is_ignored(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(path))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
