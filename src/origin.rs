use crate::constants::WILDCARD;
use crate::util::normalize_lower;
use regex_automata::meta::{BuildError, Regex};
use std::fmt;
use tracing::{trace, warn};

const MAX_PATTERN_LENGTH: usize = 4_096;

#[derive(Debug)]
pub enum PatternError {
    Build(Box<BuildError>),
    TooLong { length: usize, max: usize },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Build(_) => write!(f, "failed to compile origin pattern"),
            PatternError::TooLong { length, max } => write!(
                f,
                "origin pattern length {} exceeds maximum allowed {}",
                length, max
            ),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::Build(err) => Some(err.as_ref()),
            PatternError::TooLong { .. } => None,
        }
    }
}

/// Compiles a configured origin containing `*` into an anchored,
/// case-insensitive regex where each `*` matches any run of characters and
/// everything else matches literally.
pub fn compile_wildcard(pattern: &str) -> Result<Regex, PatternError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(PatternError::TooLong {
            length: pattern.len(),
            max: MAX_PATTERN_LENGTH,
        });
    }

    let body = pattern
        .split('*')
        .map(regex_syntax::escape)
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("(?i)^{body}$")).map_err(|err| PatternError::Build(Box::new(err)))
}

#[derive(Debug, Clone)]
enum Matcher {
    Passthrough,
    Exact(String),
    Wildcard(Regex),
    Unusable,
}

/// A configured origin pattern prepared for repeated matching.
///
/// Wildcard patterns are compiled once here so that literal origin settings
/// never hit the regex builder on the request path.
#[derive(Debug, Clone)]
pub struct OriginPattern {
    source: String,
    matcher: Matcher,
}

impl OriginPattern {
    pub fn new(pattern: &str) -> Self {
        let matcher = if pattern.is_empty() || pattern == WILDCARD {
            Matcher::Passthrough
        } else if !pattern.contains('*') {
            Matcher::Exact(normalize_lower(pattern))
        } else {
            match compile_wildcard(&normalize_lower(pattern)) {
                Ok(regex) => Matcher::Wildcard(regex),
                Err(err) => {
                    warn!(pattern, error = %err, "ignoring unusable origin pattern");
                    Matcher::Unusable
                }
            }
        };

        Self {
            source: pattern.to_string(),
            matcher,
        }
    }

    /// The pattern as configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the pattern itself for `""` and `"*"`, the candidate when it
    /// matches, and `""` otherwise so callers can move on to the next pattern.
    pub fn matches(&self, candidate: &str) -> String {
        let pattern = self.source.as_str();
        trace!(pattern, candidate, "checking configured origin");

        match &self.matcher {
            Matcher::Passthrough => return self.source.clone(),
            Matcher::Exact(exact) if *exact == normalize_lower(candidate) => {
                trace!(pattern, "origin is an exact case-insensitive match");
                return candidate.to_string();
            }
            Matcher::Wildcard(regex) if regex.is_match(candidate) => {
                trace!(pattern, candidate, "wildcard origin match");
                return candidate.to_string();
            }
            _ => {}
        }

        trace!(pattern, candidate, "origin did not match");
        String::new()
    }
}

/// Matches a single configured origin pattern against the request's origin
/// host, compiling it on the spot. See [`OriginPattern::matches`].
pub fn match_origin(pattern: &str, candidate: &str) -> String {
    OriginPattern::new(pattern).matches(candidate)
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
