//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::RouteMeta;

/// Root configuration for the agency site.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Site identity, navigation and contact widget.
    pub site: SiteSection,

    /// Fallback SEO metadata.
    pub seo: SeoConfig,

    /// Ordered route table.
    pub routes: Vec<RouteConfig>,

    /// Page definitions referenced by routes.
    pub pages: Vec<PageConfig>,

    /// Services listed under `/diensten`.
    pub services: Vec<ServiceConfig>,

    /// Blog posts served by the in-memory content source.
    pub posts: Vec<PostConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Security hardening.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Site identity and shared chrome content.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteSection {
    /// Display name used in the header and titles.
    pub name: String,

    /// Public origin, used for canonical URLs and link interception.
    pub base_url: String,

    /// Document language.
    pub lang: String,

    /// Page rendered when no route matches.
    pub not_found_page: String,

    /// Header navigation.
    pub nav: Vec<NavLinkConfig>,

    /// Contact widget shown in the chrome.
    pub contact: ContactConfig,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "Agency".to_string(),
            base_url: "http://localhost:8080".to_string(),
            lang: "nl".to_string(),
            not_found_page: "not-found".to_string(),
            nav: Vec::new(),
            contact: ContactConfig::default(),
        }
    }
}

/// A header navigation entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NavLinkConfig {
    pub label: String,
    pub href: String,
}

/// Contact widget content.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactConfig {
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Call-to-action label, e.g. "Plan een gesprek".
    pub cta_label: Option<String>,
    pub cta_href: Option<String>,
    /// Absolute URL that receives lead-form submissions. Without it the
    /// contact page links to `email` instead of rendering a form.
    pub form_action: Option<String>,
}

/// Site-wide SEO defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SeoConfig {
    /// Title used when a route declares none.
    pub default_title: String,

    /// Appended to every route title, e.g. " | Agency".
    pub title_suffix: String,

    pub description: String,

    /// Preview image, absolute or relative to `site.base_url`.
    pub image: String,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            default_title: "Agency".to_string(),
            title_suffix: String::new(),
            description: String::new(),
            image: "/og-image.png".to_string(),
        }
    }
}

/// Route configuration entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Optional identifier for logs and diagnostics.
    #[serde(default)]
    pub name: Option<String>,

    /// Segment pattern, `:name` marks a capture.
    pub pattern: String,

    /// Page to render. Mutually exclusive with `redirect_to`.
    #[serde(default)]
    pub page: Option<String>,

    /// Wrap the page in the shared site chrome.
    #[serde(default = "default_chrome")]
    pub chrome: bool,

    /// Replace history with this path instead of rendering.
    #[serde(default)]
    pub redirect_to: Option<String>,

    /// Route-specific SEO metadata.
    #[serde(default)]
    pub seo: Option<RouteMeta>,
}

fn default_chrome() -> bool {
    true
}

impl RouteConfig {
    /// A chrome-wrapped page route.
    pub fn page(pattern: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            name: None,
            pattern: pattern.into(),
            page: Some(page.into()),
            chrome: true,
            redirect_to: None,
            seo: None,
        }
    }

    /// A redirect route.
    pub fn redirect(pattern: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            name: None,
            pattern: pattern.into(),
            page: None,
            chrome: true,
            redirect_to: Some(to.into()),
            seo: None,
        }
    }
}

/// Kinds of page the site knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Heading and body copy from config.
    Static,
    /// Contact page with the lead form.
    Contact,
    /// Overview of all services.
    ServiceIndex,
    /// One service, selected by the `service` param.
    Service,
    /// List of blog posts.
    BlogIndex,
    /// One post, selected by the `slug` param.
    BlogPost,
    /// Rendered for unmatched paths.
    NotFound,
}

/// Page definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageConfig {
    pub id: String,
    pub kind: PageKind,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub body: String,
}

/// A service offered by the agency.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
}

/// A blog post fixture for the in-memory content source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PostConfig {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
    /// ISO date, e.g. "2024-03-01".
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Grace period for in-flight requests on shutdown, in seconds.
    pub shutdown_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 10,
            shutdown_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Expose Prometheus metrics at `/metrics`.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Add security response headers.
    pub enable_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
        }
    }
}
