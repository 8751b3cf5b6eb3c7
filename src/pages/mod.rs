//! The agency's pages.
//!
//! # Data Flow
//! ```text
//! [[pages]] config entries
//!     → build_registry (one Page per entry, by kind)
//!     → PageRegistry (checked against the route table at startup)
//!
//! Blog pages
//!     → content.rs ContentSource (CMS boundary)
//! ```

pub mod basic;
pub mod blog;
pub mod content;
pub mod services;

use std::sync::Arc;

use crate::config::{PageKind, SiteConfig};
use crate::render::PageRegistry;

pub use basic::{ContactPage, NotFoundPage, StaticPage};
pub use blog::{BlogIndexPage, BlogPostPage};
pub use content::{ContentError, ContentSource, InMemoryContent, Post};
pub use services::{ServiceIndexPage, ServicePage};

/// Instantiate every configured page.
pub fn build_registry(config: &SiteConfig, content: Arc<dyn ContentSource>) -> PageRegistry {
    let mut registry = PageRegistry::new();

    for page in &config.pages {
        let id = page.id.as_str();
        match page.kind {
            PageKind::Static => {
                registry.register(id, StaticPage::new(&page.heading, &page.body));
            }
            PageKind::Contact => {
                registry.register(id, ContactPage::new(&page.heading, &page.body, &config.site.contact));
            }
            PageKind::ServiceIndex => {
                registry.register(id, ServiceIndexPage::new(&page.heading, config.services.clone()));
            }
            PageKind::Service => {
                registry.register(id, ServicePage::new(id, config.services.clone()));
            }
            PageKind::BlogIndex => {
                registry.register(id, BlogIndexPage::new(&page.heading, content.clone()));
            }
            PageKind::BlogPost => {
                registry.register(id, BlogPostPage::new(id, content.clone()));
            }
            PageKind::NotFound => {
                registry.register(id, NotFoundPage::new(&page.heading, &page.body));
            }
        }
    }

    tracing::debug!(pages = registry.len(), "Page registry built");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::routing::PageId;

    #[test]
    fn test_registry_covers_config() {
        let mut config = SiteConfig::default();
        for (id, kind) in [
            ("home", PageKind::Static),
            ("blog", PageKind::BlogIndex),
            ("not-found", PageKind::NotFound),
        ] {
            config.pages.push(PageConfig {
                id: id.into(),
                kind,
                heading: id.into(),
                body: String::new(),
            });
        }

        let registry = build_registry(&config, Arc::new(InMemoryContent::default()));
        assert_eq!(registry.len(), 3);
        assert!(registry.contains(&PageId::new("blog")));
    }
}
