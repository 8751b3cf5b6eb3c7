//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Compile the route table and the page registry
//! - Cross-check routes against pages before any traffic
//! - Wire the shared resolver into the server renderer
//!
//! # Design Decisions
//! - Fail fast: a malformed table or a dangling page reference is fatal
//! - Every table problem is reported at once, not just the first
//! - The built `Site` is immutable and cheap to clone into request tasks

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::config::{load_config, validate_config, ConfigError, SiteConfig};
use crate::navigation::{NavigationContext, NavigationError, NavigationState, RouterController};
use crate::pages::{build_registry, ContentSource, InMemoryContent};
use crate::render::{PageRegistry, RenderDispatcher, RenderError, SiteChrome};
use crate::routing::{describe_errors, PageId, Resolver, RouteTable, RouteTableError};
use crate::ssr::{DocumentShell, RenderedPage, SeoDefaults, ServerRenderer};

/// Error type for startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid route table: {}", describe_errors(.0))]
    Routes(Vec<RouteTableError>),

    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Everything needed to serve and navigate the site.
#[derive(Clone)]
pub struct Site {
    config: Arc<SiteConfig>,
    resolver: Resolver,
    pages: Arc<PageRegistry>,
    renderer: Arc<ServerRenderer>,
    document: DocumentShell,
    origin: Url,
}

impl Site {
    /// Load a config file and build the site from it.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        Self::build(load_config(path)?)
    }

    /// Build the site with posts taken from the config.
    pub fn build(config: SiteConfig) -> Result<Self, StartupError> {
        let content = Arc::new(InMemoryContent::from_config(&config.posts));
        Self::build_with_content(config, content)
    }

    /// Build the site with an external content source.
    pub fn build_with_content(
        config: SiteConfig,
        content: Arc<dyn ContentSource>,
    ) -> Result<Self, StartupError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let origin = Url::parse(&config.site.base_url)?;

        let table = RouteTable::from_config(&config.routes).map_err(StartupError::Routes)?;
        let pages = build_registry(&config, content);
        table
            .check_pages(|page| pages.contains(page))
            .map_err(StartupError::Routes)?;

        let table = Arc::new(table);
        let pages = Arc::new(pages);
        let resolver = Resolver::new(table.clone(), PageId::new(&config.site.not_found_page));
        let dispatcher = RenderDispatcher::new(
            pages.clone(),
            Arc::new(SiteChrome::from_config(&config.site)),
        );
        let renderer = ServerRenderer::new(
            resolver.clone(),
            dispatcher,
            SeoDefaults::new(config.seo.clone(), origin.clone()),
        );

        tracing::info!(
            routes = table.len(),
            pages = pages.len(),
            base_url = %origin,
            "Site built"
        );

        Ok(Self {
            document: DocumentShell::from_config(&config.site),
            config: Arc::new(config),
            resolver,
            pages,
            renderer: Arc::new(renderer),
            origin,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn table(&self) -> &RouteTable {
        self.resolver.table()
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    pub fn renderer(&self) -> &ServerRenderer {
        &self.renderer
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Render `url` and wrap it in the document shell.
    pub fn render_document(&self, url: &str) -> Result<(RenderedPage, String), RenderError> {
        let page = self.renderer.render_for_request(url)?;
        let html = self.document.render(&page)?;
        Ok((page, html))
    }

    /// A client-side controller that starts from the context's location.
    pub fn controller<C: NavigationContext>(
        &self,
        context: C,
    ) -> Result<RouterController<C>, NavigationError> {
        RouterController::new(context, self.resolver.clone(), self.origin.clone())
    }

    /// A client-side controller that adopts a server-rendered state.
    pub fn hydrate<C: NavigationContext>(
        &self,
        context: C,
        state: NavigationState,
    ) -> RouterController<C> {
        RouterController::hydrate(context, self.resolver.clone(), self.origin.clone(), state)
    }
}
