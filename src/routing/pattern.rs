//! Route pattern parsing and path normalization.
//!
//! # Responsibilities
//! - Parse `/`-separated patterns into literal and parameter segments
//! - Normalize request paths (drop empty segments, strip query/fragment)
//!
//! # Design Decisions
//! - Parameter segments use a leading `:` sigil (`/blog/:slug`)
//! - Segments are compared byte-for-byte: case-sensitive, no percent-decoding
//! - Empty segments are dropped, so `/contact/`, `//contact` and `/contact`
//!   all normalize to the same path

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// Marks a segment as a named capture.
pub const PARAM_SIGIL: char = ':';

/// Errors raised while parsing a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern is empty.
    #[error("pattern is empty")]
    Empty,

    /// The pattern does not start with `/`.
    #[error("pattern `{0}` must start with `/`")]
    MissingLeadingSlash(String),

    /// A `:` sigil with no name after it.
    #[error("pattern `{0}` has a parameter without a name")]
    EmptyParamName(String),

    /// The same parameter name appears twice.
    #[error("pattern `{pattern}` declares parameter `{name}` more than once")]
    DuplicateParam { pattern: String, name: String },
}

/// A single pattern segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must equal the input segment exactly.
    Literal(String),
    /// Accepts any input segment and captures it under this name.
    Param(String),
}

impl Segment {
    pub fn is_param(&self) -> bool {
        matches!(self, Segment::Param(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(s) => f.write_str(s),
            Segment::Param(name) => write!(f, "{PARAM_SIGIL}{name}"),
        }
    }
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/diensten/:service`.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if raw.is_empty() {
            return Err(PatternError::Empty);
        }
        if !raw.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(raw.to_string()));
        }

        let mut seen = HashSet::new();
        let mut segments = Vec::new();
        for part in split_path(raw) {
            match part.strip_prefix(PARAM_SIGIL) {
                Some("") => return Err(PatternError::EmptyParamName(raw.to_string())),
                Some(name) => {
                    if !seen.insert(name) {
                        return Err(PatternError::DuplicateParam {
                            pattern: raw.to_string(),
                            name: name.to_string(),
                        });
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as it was declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments after normalization.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root pattern `/`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when the pattern contains no parameter segments.
    pub fn is_literal(&self) -> bool {
        !self.segments.iter().any(Segment::is_param)
    }

    /// Declared parameter names in pattern order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// True when every input accepted by `self` is also accepted by `other`.
    ///
    /// Used at startup to find routes that can never win.
    pub fn is_covered_by(&self, other: &RoutePattern) -> bool {
        self.len() == other.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(mine, theirs)| match (mine, theirs) {
                    (_, Segment::Param(_)) => true,
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Literal(_)) => false,
                })
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a path on `/`, dropping empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Canonical form of a path: leading `/`, no empty or trailing segments.
pub fn normalize_path(path: &str) -> String {
    format!("/{}", split_path(path).join("/"))
}

/// Drop the query string and fragment from a request target.
pub fn strip_query_and_fragment(target: &str) -> &str {
    match target.find(|c: char| c == '?' || c == '#') {
        Some(idx) => &target[..idx],
        None => target,
    }
}
