//! Agency marketing site: routing core, client navigation and server rendering.

// Routing core
pub mod navigation;
pub mod render;
pub mod routing;

// Site content and server rendering
pub mod pages;
pub mod ssr;

// Serving
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::SiteConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, Site};
pub use navigation::RouterController;
pub use routing::{Resolver, RouteTable};
pub use ssr::ServerRenderer;
