//! Service overview and detail pages.

use std::fmt::Write;

use crate::config::ServiceConfig;
use crate::render::page::require_param;
use crate::render::{escape, Page, RenderError};
use crate::routing::RouteParams;

/// Lists every service with a link to its detail page.
#[derive(Debug, Clone)]
pub struct ServiceIndexPage {
    heading: String,
    services: Vec<ServiceConfig>,
}

impl ServiceIndexPage {
    pub fn new(heading: impl Into<String>, services: Vec<ServiceConfig>) -> Self {
        Self {
            heading: heading.into(),
            services,
        }
    }
}

impl Page for ServiceIndexPage {
    fn render(&self, _params: &RouteParams) -> Result<String, RenderError> {
        let mut out = String::from(r#"<section class="page services">"#);
        let _ = write!(out, "<h1>{}</h1><ul class=\"cards\">", escape(&self.heading));
        for service in &self.services {
            let _ = write!(
                out,
                r#"<li class="card"><a href="/diensten/{}"><h2>{}</h2><p>{}</p></a></li>"#,
                escape(&service.slug),
                escape(&service.name),
                escape(&service.summary)
            );
        }
        out.push_str("</ul></section>");
        Ok(out)
    }
}

/// One service, selected by the `service` param.
#[derive(Debug, Clone)]
pub struct ServicePage {
    id: String,
    services: Vec<ServiceConfig>,
}

impl ServicePage {
    pub fn new(id: impl Into<String>, services: Vec<ServiceConfig>) -> Self {
        Self {
            id: id.into(),
            services,
        }
    }
}

impl Page for ServicePage {
    fn render(&self, params: &RouteParams) -> Result<String, RenderError> {
        let slug = require_param(&self.id, params, "service")?;

        let Some(service) = self.services.iter().find(|s| s.slug == slug) else {
            return Ok(format!(
                r#"<section class="page service missing"><h1>Onbekende dienst</h1><p>We bieden &quot;{}&quot; (nog) niet aan.</p><a href="/diensten">Alle diensten</a></section>"#,
                escape(slug)
            ));
        };

        Ok(format!(
            r#"<section class="page service"><h1>{}</h1><p>{}</p><a class="cta" href="/contact">Neem contact op</a></section>"#,
            escape(&service.name),
            escape(&service.summary)
        ))
    }
}
