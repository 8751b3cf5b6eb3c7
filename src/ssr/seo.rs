//! SEO metadata derivation.
//!
//! # Design Decisions
//! - Route metadata wins; site defaults fill whatever the route leaves out
//! - `{param}` placeholders in route metadata are filled from captured params
//! - Canonical URL is the resolved path on the configured base URL, so
//!   trailing-slash and redirect variants share one canonical

use serde::Serialize;
use url::Url;

use crate::config::SeoConfig;
use crate::routing::{RouteMeta, RouteParams};

/// Metadata the HTML shell writes into the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoDescriptor {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_image: String,
}

/// Site-wide defaults plus the public origin.
#[derive(Debug, Clone)]
pub struct SeoDefaults {
    config: SeoConfig,
    base_url: Url,
}

impl SeoDefaults {
    pub fn new(config: SeoConfig, base_url: Url) -> Self {
        Self { config, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Describe the page at `path` matched with `meta` and `params`.
    pub fn describe(&self, meta: Option<&RouteMeta>, params: &RouteParams, path: &str) -> SeoDescriptor {
        let title = match meta.and_then(|m| m.title.as_deref()) {
            Some(title) => format!("{}{}", interpolate(title, params), self.config.title_suffix),
            None => self.config.default_title.clone(),
        };

        let description = meta
            .and_then(|m| m.description.as_deref())
            .map(|d| interpolate(d, params))
            .unwrap_or_else(|| self.config.description.clone());

        let image = meta
            .and_then(|m| m.image.as_deref())
            .map(|i| interpolate(i, params))
            .unwrap_or_else(|| self.config.image.clone());

        SeoDescriptor {
            title,
            description,
            canonical: self.absolute(path),
            og_image: self.absolute(&image),
        }
    }

    fn absolute(&self, href: &str) -> String {
        self.base_url
            .join(href)
            .map(String::from)
            .unwrap_or_else(|_| href.to_string())
    }
}

/// Replace `{name}` with the value of param `name`. Unknown placeholders stay.
///
/// One left-to-right pass: substituted values are never scanned again.
fn interpolate(template: &str, params: &RouteParams) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
