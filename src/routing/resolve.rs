//! Turning a path into a renderable outcome.
//!
//! # Responsibilities
//! - Map a match result onto a page, params and chrome decision
//! - Substitute the not-found page for unmatched paths
//! - Surface redirect routes as a separate step, or follow them to the end
//!
//! # Design Decisions
//! - NoMatch is a resolved outcome, never an error
//! - Redirect chains are bounded by a visited set; a revisit is a cycle

use std::sync::Arc;

use thiserror::Error;

use crate::routing::matcher::match_path;
use crate::routing::pattern::{normalize_path, strip_query_and_fragment};
use crate::routing::table::{PageId, RouteDefinition, RouteParams, RouteTable, RouteTarget};

/// Errors raised while following redirects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("redirect cycle: {}", .chain.join(" -> "))]
    RedirectCycle { chain: Vec<String> },
}

/// A path resolved to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// Normalized path that produced this resolution.
    pub path: String,
    /// The matched route, `None` when the not-found page is used.
    pub route: Option<&'a RouteDefinition>,
    pub page: PageId,
    pub params: RouteParams,
    pub uses_chrome: bool,
}

impl Resolved<'_> {
    pub fn is_not_found(&self) -> bool {
        self.route.is_none()
    }
}

/// One resolution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<'a> {
    Render(Resolved<'a>),
    Redirect(&'a str),
}

/// Resolves paths against a shared route table.
#[derive(Debug, Clone)]
pub struct Resolver {
    table: Arc<RouteTable>,
    not_found: PageId,
}

impl Resolver {
    pub fn new(table: Arc<RouteTable>, not_found: PageId) -> Self {
        Self { table, not_found }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn not_found_page(&self) -> &PageId {
        &self.not_found
    }

    /// Resolve one hop: either a page to render or a redirect target.
    pub fn step(&self, target: &str) -> Step<'_> {
        let path = normalize_path(strip_query_and_fragment(target));
        let (route, params) = match_path(&path, self.table.routes()).into_parts();

        match route {
            Some(route) => match route.target() {
                RouteTarget::Redirect(to) => Step::Redirect(to),
                RouteTarget::Page(page) => Step::Render(Resolved {
                    path,
                    route: Some(route),
                    page: page.clone(),
                    params,
                    uses_chrome: route.uses_chrome(),
                }),
            },
            None => Step::Render(Resolved {
                path,
                route: None,
                page: self.not_found.clone(),
                params: RouteParams::new(),
                uses_chrome: true,
            }),
        }
    }

    /// Follow redirects until a page is reached.
    pub fn resolve(&self, target: &str) -> Result<Resolved<'_>, ResolveError> {
        let mut chain = Vec::new();
        let mut current = target.to_string();

        loop {
            let path = normalize_path(strip_query_and_fragment(&current));
            if chain.contains(&path) {
                chain.push(path);
                return Err(ResolveError::RedirectCycle { chain });
            }
            chain.push(path);

            match self.step(&current) {
                Step::Render(resolved) => return Ok(resolved),
                Step::Redirect(to) => current = to.to_string(),
            }
        }
    }
}
