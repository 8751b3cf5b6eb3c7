//! Route definitions and the validated route table.
//!
//! # Responsibilities
//! - Hold the ordered list of route definitions
//! - Reject malformed tables once, before first use
//!
//! # Design Decisions
//! - Immutable after construction, shared via `Arc`
//! - Validation collects every problem instead of stopping at the first
//! - Routes that can never win are rejected rather than left to table order

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RouteConfig;
use crate::routing::matcher::match_path;
use crate::routing::pattern::{normalize_path, PatternError, RoutePattern};

/// Opaque reference to a renderable page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-route SEO metadata. Values may reference params as `{name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// What a matched route resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Render this page.
    Page(PageId),
    /// Never rendered; history is replaced with this literal path.
    Redirect(String),
}

/// A single immutable route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    name: Option<String>,
    pattern: RoutePattern,
    param_names: BTreeSet<String>,
    target: RouteTarget,
    uses_chrome: bool,
    meta: Option<RouteMeta>,
}

impl RouteDefinition {
    /// A route rendering `page`, wrapped in site chrome.
    pub fn page(pattern: &str, page: impl Into<PageId>) -> Result<Self, PatternError> {
        Self::with_target(pattern, RouteTarget::Page(page.into()))
    }

    /// A route that redirects to `target`.
    pub fn redirect(pattern: &str, target: impl Into<String>) -> Result<Self, PatternError> {
        Self::with_target(pattern, RouteTarget::Redirect(target.into()))
    }

    fn with_target(pattern: &str, target: RouteTarget) -> Result<Self, PatternError> {
        let pattern = RoutePattern::parse(pattern)?;
        let param_names = pattern.param_names().map(str::to_string).collect();
        Ok(Self {
            name: None,
            pattern,
            param_names,
            target,
            uses_chrome: true,
            meta: None,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Render the page standalone, outside the site chrome.
    pub fn without_chrome(mut self) -> Self {
        self.uses_chrome = false;
        self
    }

    pub fn with_chrome(mut self, uses_chrome: bool) -> Self {
        self.uses_chrome = uses_chrome;
        self
    }

    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn param_names(&self) -> &BTreeSet<String> {
        &self.param_names
    }

    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    /// The rendered page, `None` for redirect routes.
    pub fn page_id(&self) -> Option<&PageId> {
        match &self.target {
            RouteTarget::Page(id) => Some(id),
            RouteTarget::Redirect(_) => None,
        }
    }

    pub fn redirect_to(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::Redirect(to) => Some(to),
            RouteTarget::Page(_) => None,
        }
    }

    pub fn uses_chrome(&self) -> bool {
        self.uses_chrome
    }

    pub fn meta(&self) -> Option<&RouteMeta> {
        self.meta.as_ref()
    }

    fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({})", self.pattern),
            None => self.pattern.to_string(),
        }
    }
}

/// Captured parameter values keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A problem that prevents a route table from being used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route table is empty")]
    Empty,

    #[error("route #{index}: {source}")]
    MalformedPattern {
        index: usize,
        #[source]
        source: PatternError,
    },

    #[error("route #{index} `{pattern}` declares both a page and a redirect, or neither")]
    AmbiguousTarget { index: usize, pattern: String },

    #[error("route `{route}` can never match: every path it accepts is taken by `{shadowed_by}`")]
    UnreachableRoute { route: String, shadowed_by: String },

    #[error("route `{route}` redirects to `{target}`, which is not a plain absolute path")]
    InvalidRedirectTarget { route: String, target: String },

    #[error("route `{route}` redirects to `{target}`, which matches no route")]
    RedirectTargetUnmatched { route: String, target: String },

    #[error("redirect cycle: {}", .chain.join(" -> "))]
    RedirectCycle { chain: Vec<String> },

    #[error("route `{route}` references unknown page `{page}`")]
    UnknownPage { route: String, page: PageId },
}

/// Render a list of table errors on one line.
pub fn describe_errors(errors: &[RouteTableError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Ordered, validated, immutable list of routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
}

impl RouteTable {
    /// Validate `routes` and freeze them into a table.
    pub fn new(routes: Vec<RouteDefinition>) -> Result<Self, Vec<RouteTableError>> {
        let errors = validate_routes(&routes);
        if errors.is_empty() {
            Ok(Self { routes })
        } else {
            Err(errors)
        }
    }

    /// Build the table from `[[routes]]` configuration entries.
    pub fn from_config(configs: &[RouteConfig]) -> Result<Self, Vec<RouteTableError>> {
        let mut errors = Vec::new();
        let mut routes = Vec::with_capacity(configs.len());

        for (index, config) in configs.iter().enumerate() {
            let definition = match (&config.page, &config.redirect_to) {
                (Some(page), None) => RouteDefinition::page(&config.pattern, page.as_str()),
                (None, Some(to)) => RouteDefinition::redirect(&config.pattern, to.as_str()),
                _ => {
                    errors.push(RouteTableError::AmbiguousTarget {
                        index,
                        pattern: config.pattern.clone(),
                    });
                    continue;
                }
            };

            match definition {
                Ok(mut route) => {
                    route = route.with_chrome(config.chrome);
                    if let Some(name) = &config.name {
                        route = route.named(name.clone());
                    }
                    if let Some(meta) = &config.seo {
                        route = route.with_meta(meta.clone());
                    }
                    routes.push(route);
                }
                Err(source) => errors.push(RouteTableError::MalformedPattern { index, source }),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Self::new(routes)
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(routes: Vec<RouteDefinition>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Every page id referenced by a page route.
    pub fn page_ids(&self) -> impl Iterator<Item = &PageId> {
        self.routes.iter().filter_map(RouteDefinition::page_id)
    }

    /// Check that every referenced page satisfies `exists`.
    pub fn check_pages(&self, exists: impl Fn(&PageId) -> bool) -> Result<(), Vec<RouteTableError>> {
        let errors: Vec<_> = self
            .routes
            .iter()
            .filter_map(|route| {
                route
                    .page_id()
                    .filter(|page| !exists(page))
                    .map(|page| RouteTableError::UnknownPage {
                        route: route.label(),
                        page: page.clone(),
                    })
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn validate_routes(routes: &[RouteDefinition]) -> Vec<RouteTableError> {
    let mut errors = Vec::new();

    if routes.is_empty() {
        errors.push(RouteTableError::Empty);
        return errors;
    }

    for (index, route) in routes.iter().enumerate() {
        if let Some(earlier) = routes[..index].iter().find(|earlier| shadows(earlier, route)) {
            errors.push(RouteTableError::UnreachableRoute {
                route: route.label(),
                shadowed_by: earlier.label(),
            });
        }
    }

    for route in routes {
        if let Some(target) = route.redirect_to() {
            if let Err(e) = check_redirect_chain(routes, route, target) {
                errors.push(e);
            }
        }
    }

    errors
}

/// Literal routes win in the exact pass regardless of position, so only an
/// identical literal can hide one. Parameterized routes are matched in table
/// order, so an earlier parameterized route covering every input hides it.
fn shadows(earlier: &RouteDefinition, route: &RouteDefinition) -> bool {
    match (earlier.pattern.is_literal(), route.pattern.is_literal()) {
        (true, true) => earlier.pattern.segments() == route.pattern.segments(),
        (false, false) => route.pattern.is_covered_by(&earlier.pattern),
        _ => false,
    }
}

fn check_redirect_chain(
    routes: &[RouteDefinition],
    origin: &RouteDefinition,
    first_target: &str,
) -> Result<(), RouteTableError> {
    let mut chain = Vec::new();
    if origin.pattern.is_literal() {
        chain.push(normalize_path(origin.pattern.as_str()));
    }

    let mut target = first_target.to_string();
    loop {
        if !target.starts_with('/') || target.contains(|c: char| matches!(c, '?' | '#' | ':')) {
            return Err(RouteTableError::InvalidRedirectTarget {
                route: origin.label(),
                target,
            });
        }

        let path = normalize_path(&target);
        if chain.contains(&path) {
            chain.push(path);
            return Err(RouteTableError::RedirectCycle { chain });
        }
        chain.push(path.clone());

        let result = match_path(&path, routes);
        match result.route().map(RouteDefinition::target) {
            None => {
                return Err(RouteTableError::RedirectTargetUnmatched {
                    route: origin.label(),
                    target,
                })
            }
            Some(RouteTarget::Redirect(next)) => target = next.clone(),
            Some(RouteTarget::Page(_)) => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(pattern: &str, id: &str) -> RouteDefinition {
        RouteDefinition::page(pattern, id).unwrap()
    }

    #[test]
    fn test_valid_table() {
        let table = RouteTable::new(vec![
            page("/", "home"),
            page("/blog/:slug", "post"),
            RouteDefinition::redirect("/projecten", "/succesverhalen").unwrap(),
            page("/succesverhalen", "stories"),
        ])
        .unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.page_ids().count(), 3);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(RouteTable::new(Vec::new()).unwrap_err(), vec![RouteTableError::Empty]);
    }

    #[test]
    fn test_duplicate_literal_unreachable() {
        let errors = RouteTable::new(vec![page("/contact", "a"), page("/contact/", "b")]).unwrap_err();
        assert!(matches!(&errors[..], [RouteTableError::UnreachableRoute { .. }]));
    }

    #[test]
    fn test_parameterized_route_shadowed() {
        let errors = RouteTable::new(vec![
            page("/blog/:slug", "post"),
            page("/blog/:id", "other"),
        ])
        .unwrap_err();
        assert!(matches!(
            &errors[..],
            [RouteTableError::UnreachableRoute { shadowed_by, .. }] if shadowed_by == "/blog/:slug"
        ));
    }

    #[test]
    fn test_literal_after_param_is_reachable() {
        let table = RouteTable::new(vec![page("/a/:x", "param"), page("/a/b", "literal")]);
        assert!(table.is_ok());
    }

    #[test]
    fn test_redirect_cycle_rejected() {
        let errors = RouteTable::new(vec![
            RouteDefinition::redirect("/a", "/b").unwrap(),
            RouteDefinition::redirect("/b", "/a").unwrap(),
        ])
        .unwrap_err();
        assert!(errors
            .iter()
            .all(|e| matches!(e, RouteTableError::RedirectCycle { .. })));
        assert_eq!(
            errors[0].to_string(),
            "redirect cycle: /a -> /b -> /a"
        );
    }

    #[test]
    fn test_self_redirect_rejected() {
        let errors = RouteTable::new(vec![RouteDefinition::redirect("/loop", "/loop/").unwrap()])
            .unwrap_err();
        assert!(matches!(&errors[..], [RouteTableError::RedirectCycle { .. }]));
    }

    #[test]
    fn test_redirect_target_must_match() {
        let errors = RouteTable::new(vec![
            page("/", "home"),
            RouteDefinition::redirect("/old", "/nowhere").unwrap(),
        ])
        .unwrap_err();
        assert!(matches!(
            &errors[..],
            [RouteTableError::RedirectTargetUnmatched { target, .. }] if target == "/nowhere"
        ));
    }

    #[test]
    fn test_redirect_target_must_be_path() {
        let errors = RouteTable::new(vec![
            page("/", "home"),
            RouteDefinition::redirect("/old", "https://elsewhere.example").unwrap(),
        ])
        .unwrap_err();
        assert!(matches!(&errors[..], [RouteTableError::InvalidRedirectTarget { .. }]));
    }

    #[test]
    fn test_from_config_collects_pattern_errors() {
        let configs = vec![
            RouteConfig::page("", "home"),
            RouteConfig::page("/a/:id/:id", "dup"),
            RouteConfig {
                redirect_to: Some("/x".into()),
                ..RouteConfig::page("/both", "page")
            },
        ];
        let errors = RouteTable::from_config(&configs).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(
            errors[0],
            RouteTableError::MalformedPattern { index: 0, source: PatternError::Empty }
        ));
        assert!(matches!(errors[2], RouteTableError::AmbiguousTarget { index: 2, .. }));
    }

    #[test]
    fn test_check_pages() {
        let table = RouteTable::new(vec![page("/", "home"), page("/team", "team").named("team")]).unwrap();
        let errors = table.check_pages(|id| id.as_str() == "home").unwrap_err();
        assert_eq!(
            errors,
            vec![RouteTableError::UnknownPage {
                route: "team (/team)".into(),
                page: PageId::new("team"),
            }]
        );
    }
}
