//! The HTML document shell around a server render.
//!
//! # Responsibilities
//! - Write SEO metadata into the head
//! - Embed the rendered markup in the hydration root
//! - Embed the navigation state as a JSON payload the client reads back
//!
//! # Design Decisions
//! - `</` inside the JSON payload is written as `<\/` so post content cannot
//!   close the script element; JSON parsers read it back unchanged

use std::fmt::Write;

use crate::config::SiteSection;
use crate::navigation::NavigationState;
use crate::render::{escape, RenderError};
use crate::ssr::renderer::RenderedPage;

/// Element id of the hydration payload.
pub const HYDRATION_SCRIPT_ID: &str = "__route_state";

/// Element id of the hydration root.
pub const APP_ROOT_ID: &str = "app";

/// Builds full documents for rendered pages.
#[derive(Debug, Clone)]
pub struct DocumentShell {
    lang: String,
    site_name: String,
}

impl DocumentShell {
    pub fn new(lang: impl Into<String>, site_name: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            site_name: site_name.into(),
        }
    }

    pub fn from_config(site: &SiteSection) -> Self {
        Self::new(&site.lang, &site.name)
    }

    /// Produce the complete HTML document.
    pub fn render(&self, page: &RenderedPage) -> Result<String, RenderError> {
        let payload = hydration_payload(&page.state)?;
        let seo = &page.seo;

        let mut out = String::with_capacity(page.markup.len() + payload.len() + 1024);
        let _ = write!(
            out,
            r#"<!DOCTYPE html><html lang="{}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1">"#,
            escape(&self.lang)
        );
        let _ = write!(out, "<title>{}</title>", escape(&seo.title));
        let _ = write!(
            out,
            r#"<meta name="description" content="{}"><link rel="canonical" href="{}">"#,
            escape(&seo.description),
            escape(&seo.canonical)
        );
        for (property, value) in [
            ("og:title", &seo.title),
            ("og:description", &seo.description),
            ("og:url", &seo.canonical),
            ("og:image", &seo.og_image),
            ("og:site_name", &self.site_name),
        ] {
            let _ = write!(
                out,
                r#"<meta property="{property}" content="{}">"#,
                escape(value)
            );
        }
        let _ = write!(
            out,
            r#"</head><body><div id="{APP_ROOT_ID}">{}</div><script type="application/json" id="{HYDRATION_SCRIPT_ID}">{payload}</script></body></html>"#,
            page.markup
        );
        Ok(out)
    }
}

/// Serialize `state` for embedding in a script element.
pub fn hydration_payload(state: &NavigationState) -> Result<String, RenderError> {
    Ok(serde_json::to_string(state)?.replace("</", r"<\/"))
}

/// Read the navigation state back out of a hydration payload.
pub fn parse_hydration(payload: &str) -> Result<NavigationState, RenderError> {
    Ok(serde_json::from_str(payload)?)
}

/// Locate and parse the hydration payload in a full document.
pub fn extract_hydration(document: &str) -> Result<Option<NavigationState>, RenderError> {
    let open = format!(r#"id="{HYDRATION_SCRIPT_ID}">"#);
    let Some(start) = document.find(&open).map(|i| i + open.len()) else {
        return Ok(None);
    };
    let Some(len) = document[start..].find("</script>") else {
        return Ok(None);
    };
    parse_hydration(&document[start..start + len]).map(Some)
}
