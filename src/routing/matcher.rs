//! Path matching.
//!
//! # Responsibilities
//! - Resolve a request path to the first matching route and its params
//! - Return an explicit no-match instead of a silent default
//!
//! # Design Decisions
//! - Pure function: no I/O, no hidden state, safe from client and server
//! - Exact pass over literal routes first, so a literal route is never
//!   shadowed by an earlier parameterized route of the same length
//! - Parameterized pass is positional: first route in table order wins
//! - Callers strip query and fragment before matching

use crate::routing::pattern::{split_path, RoutePattern, Segment};
use crate::routing::table::{RouteDefinition, RouteParams};

static NO_PARAMS: RouteParams = RouteParams::new();

/// Outcome of matching one path against a route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    route: Option<&'a RouteDefinition>,
    params: RouteParams,
}

impl<'a> MatchResult<'a> {
    fn matched(route: &'a RouteDefinition, params: RouteParams) -> Self {
        Self {
            route: Some(route),
            params,
        }
    }

    /// The no-match sentinel.
    pub fn no_match() -> Self {
        Self {
            route: None,
            params: RouteParams::new(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.route.is_some()
    }

    pub fn route(&self) -> Option<&'a RouteDefinition> {
        self.route
    }

    /// Captured params, empty on no-match.
    pub fn params(&self) -> &RouteParams {
        if self.route.is_some() {
            &self.params
        } else {
            &NO_PARAMS
        }
    }

    pub fn into_parts(self) -> (Option<&'a RouteDefinition>, RouteParams) {
        (self.route, self.params)
    }
}

/// Match `path` against `routes`.
pub fn match_path<'a>(path: &str, routes: &'a [RouteDefinition]) -> MatchResult<'a> {
    let segments = split_path(path);

    let exact = routes
        .iter()
        .filter(|route| route.pattern().is_literal())
        .find(|route| literal_matches(route.pattern(), &segments));
    if let Some(route) = exact {
        return MatchResult::matched(route, RouteParams::new());
    }

    routes
        .iter()
        .filter(|route| !route.pattern().is_literal())
        .find_map(|route| capture(route.pattern(), &segments).map(|params| MatchResult::matched(route, params)))
        .unwrap_or_else(MatchResult::no_match)
}

fn literal_matches(pattern: &RoutePattern, segments: &[&str]) -> bool {
    pattern.len() == segments.len()
        && pattern
            .segments()
            .iter()
            .zip(segments)
            .all(|(expected, actual)| matches!(expected, Segment::Literal(lit) if lit.as_str() == *actual))
}

fn capture(pattern: &RoutePattern, segments: &[&str]) -> Option<RouteParams> {
    if pattern.len() != segments.len() {
        return None;
    }

    let mut params = RouteParams::new();
    for (expected, actual) in pattern.segments().iter().zip(segments) {
        match expected {
            Segment::Literal(lit) if lit.as_str() != *actual => return None,
            Segment::Literal(_) => {}
            Segment::Param(name) => params.insert(name.as_str(), *actual),
        }
    }
    Some(params)
}
