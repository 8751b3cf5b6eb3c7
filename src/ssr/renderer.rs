//! Server renderer.
//!
//! # Responsibilities
//! - Resolve the initial request path exactly as the client would
//! - Derive SEO metadata from the matched route
//! - Render markup and the hydration state for the document
//!
//! # Design Decisions
//! - Stateless per call; only reads immutable shared data, so it is safe to
//!   call concurrently from every request task
//! - Any render error fails the request; nothing is retried or swallowed
//! - Redirect chains are followed here and reported, so the HTTP layer can
//!   answer with a redirect instead of a page

use serde::Serialize;
use url::Url;

use crate::navigation::NavigationState;
use crate::render::{RenderDispatcher, RenderError};
use crate::routing::{normalize_path, strip_query_and_fragment, Resolver};
use crate::ssr::seo::{SeoDefaults, SeoDescriptor};

/// Whether the request resolved to a real route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    Found,
    NotFound,
}

/// Output of one server render.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    pub markup: String,
    pub seo: SeoDescriptor,
    pub status: RenderStatus,
    /// Resolved state; the client hydrates from it.
    pub state: NavigationState,
    /// Set when the requested path redirected to `state.path`.
    pub redirected_from: Option<String>,
}

/// Renders the initial document body for a request.
#[derive(Clone)]
pub struct ServerRenderer {
    resolver: Resolver,
    dispatcher: RenderDispatcher,
    seo: SeoDefaults,
}

impl ServerRenderer {
    pub fn new(resolver: Resolver, dispatcher: RenderDispatcher, seo: SeoDefaults) -> Self {
        Self {
            resolver,
            dispatcher,
            seo,
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolve, describe and render `url`.
    ///
    /// `url` may be a path (`/blog/x?ref=y`) or an absolute URL.
    pub fn render_for_request(&self, url: &str) -> Result<RenderedPage, RenderError> {
        let target = request_path(url);
        let requested = normalize_path(&target);

        let resolved = self.resolver.resolve(&target)?;
        let seo = self.seo.describe(
            resolved.route.and_then(|route| route.meta()),
            &resolved.params,
            &resolved.path,
        );
        let status = if resolved.is_not_found() {
            RenderStatus::NotFound
        } else {
            RenderStatus::Found
        };

        let state = NavigationState::from(resolved);
        let markup = self.dispatcher.render(&state)?;
        let redirected_from = (state.path != requested).then_some(requested);

        tracing::debug!(
            url = %url,
            path = %state.path,
            page = %state.page,
            ?status,
            redirected = redirected_from.is_some(),
            "Server render complete"
        );

        Ok(RenderedPage {
            markup,
            seo,
            status,
            state,
            redirected_from,
        })
    }
}

fn request_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => strip_query_and_fragment(url).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::SeoConfig;
    use crate::render::{Chrome, PageRegistry};
    use crate::routing::{PageId, RouteDefinition, RouteMeta, RouteParams, RouteTable};

    struct Wrap;

    impl Chrome for Wrap {
        fn wrap(&self, slot: &str) -> String {
            format!("<chrome>{slot}</chrome>")
        }
    }

    fn renderer() -> ServerRenderer {
        let table = RouteTable::new(vec![
            RouteDefinition::page("/", "home").unwrap(),
            RouteDefinition::page("/diensten/:service", "service")
                .unwrap()
                .with_meta(RouteMeta {
                    title: Some("{service}".into()),
                    ..RouteMeta::default()
                }),
            RouteDefinition::page("/boom", "boom").unwrap(),
            RouteDefinition::redirect("/projecten", "/succesverhalen").unwrap(),
            RouteDefinition::page("/succesverhalen", "stories").unwrap().without_chrome(),
        ])
        .unwrap();

        let mut pages = PageRegistry::new();
        pages
            .register("home", |_: &RouteParams| -> Result<String, RenderError> { Ok("home".into()) })
            .register("service", |p: &RouteParams| -> Result<String, RenderError> {
                Ok(format!("service:{}", p.get("service").unwrap_or_default()))
            })
            .register("boom", |_: &RouteParams| -> Result<String, RenderError> {
                Err(RenderError::MissingParam {
                    page: PageId::new("boom"),
                    param: "fuse".into(),
                })
            })
            .register("stories", |_: &RouteParams| -> Result<String, RenderError> { Ok("stories".into()) })
            .register("not-found", |_: &RouteParams| -> Result<String, RenderError> { Ok("404".into()) });

        ServerRenderer::new(
            Resolver::new(Arc::new(table), PageId::new("not-found")),
            RenderDispatcher::new(Arc::new(pages), Arc::new(Wrap)),
            SeoDefaults::new(
                SeoConfig::default(),
                Url::parse("https://studio.example").unwrap(),
            ),
        )
    }

    #[test]
    fn test_render_param_route() {
        let page = renderer()
            .render_for_request("/diensten/websites?utm_source=x#top")
            .unwrap();
        assert_eq!(page.markup, "<chrome>service:websites</chrome>");
        assert_eq!(page.status, RenderStatus::Found);
        assert_eq!(page.seo.title, "websites");
        assert_eq!(page.seo.canonical, "https://studio.example/diensten/websites");
        assert_eq!(page.state.params.get("service"), Some("websites"));
        assert!(page.redirected_from.is_none());
    }

    #[test]
    fn test_absolute_url_input() {
        let page = renderer()
            .render_for_request("https://studio.example/?x=1")
            .unwrap();
        assert_eq!(page.state.page.as_str(), "home");
    }

    #[test]
    fn test_not_found() {
        let page = renderer().render_for_request("/bestaat/niet").unwrap();
        assert_eq!(page.status, RenderStatus::NotFound);
        assert_eq!(page.markup, "<chrome>404</chrome>");
        assert_eq!(page.seo.title, SeoConfig::default().default_title);
    }

    #[test]
    fn test_redirect_reported() {
        let page = renderer().render_for_request("/projecten/").unwrap();
        assert_eq!(page.state.path, "/succesverhalen");
        assert_eq!(page.redirected_from.as_deref(), Some("/projecten"));
        assert_eq!(page.markup, "stories");
    }

    #[test]
    fn test_trailing_slash_is_not_a_redirect() {
        let page = renderer().render_for_request("/diensten/websites/").unwrap();
        assert!(page.redirected_from.is_none());
    }

    #[test]
    fn test_render_error_propagates() {
        assert!(matches!(
            renderer().render_for_request("/boom"),
            Err(RenderError::MissingParam { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let renderer = renderer();
        let a = renderer.render_for_request("/diensten/seo").unwrap();
        let b = renderer.render_for_request("/diensten/seo").unwrap();
        assert_eq!(a.markup, b.markup);
        assert_eq!(a.seo, b.seo);
        assert_eq!(a.state, b.state);
    }
}
