//! Content pages with copy from configuration.

use std::fmt::Write;

use crate::config::ContactConfig;
use crate::render::{escape, Page, RenderError};
use crate::routing::RouteParams;

/// Heading plus paragraphs. Blank lines in `body` separate paragraphs.
#[derive(Debug, Clone)]
pub struct StaticPage {
    heading: String,
    body: String,
}

impl StaticPage {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}

impl Page for StaticPage {
    fn render(&self, _params: &RouteParams) -> Result<String, RenderError> {
        let mut out = String::from(r#"<section class="page">"#);
        let _ = write!(out, "<h1>{}</h1>", escape(&self.heading));
        paragraphs(&mut out, &self.body);
        out.push_str("</section>");
        Ok(out)
    }
}

/// Contact page with the lead-capture form.
///
/// The form posts to the external endpoint in `form_action`; this server
/// only serves GET.
#[derive(Debug, Clone)]
pub struct ContactPage {
    heading: String,
    body: String,
    form_action: Option<String>,
    email: Option<String>,
}

impl ContactPage {
    pub fn new(heading: impl Into<String>, body: impl Into<String>, contact: &ContactConfig) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
            form_action: contact.form_action.clone(),
            email: contact.email.clone(),
        }
    }
}

impl Page for ContactPage {
    fn render(&self, _params: &RouteParams) -> Result<String, RenderError> {
        let mut out = String::from(r#"<section class="page contact">"#);
        let _ = write!(out, "<h1>{}</h1>", escape(&self.heading));
        paragraphs(&mut out, &self.body);

        match (&self.form_action, &self.email) {
            (Some(action), _) => {
                let _ = write!(
                    out,
                    r#"<form class="lead-form" method="post" action="{}">"#,
                    escape(action)
                );
                out.push_str(concat!(
                    r#"<label>Naam<input name="name" required></label>"#,
                    r#"<label>E-mail<input name="email" type="email" required></label>"#,
                    r#"<label>Bericht<textarea name="message"></textarea></label>"#,
                    r#"<button type="submit">Verstuur</button>"#,
                    "</form>",
                ));
            }
            (None, Some(email)) => {
                let email = escape(email);
                let _ = write!(out, r#"<a class="lead-mail" href="mailto:{email}">{email}</a>"#);
            }
            (None, None) => {}
        }

        out.push_str("</section>");
        Ok(out)
    }
}

/// Shown for unmatched paths.
#[derive(Debug, Clone)]
pub struct NotFoundPage {
    heading: String,
    body: String,
}

impl NotFoundPage {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        let heading = heading.into();
        let body = body.into();
        Self {
            heading: if heading.is_empty() {
                "Pagina niet gevonden".to_string()
            } else {
                heading
            },
            body: if body.is_empty() {
                "De pagina die je zoekt bestaat niet (meer).".to_string()
            } else {
                body
            },
        }
    }
}

impl Page for NotFoundPage {
    fn render(&self, _params: &RouteParams) -> Result<String, RenderError> {
        let mut out = String::from(r#"<section class="page not-found">"#);
        let _ = write!(out, "<h1>{}</h1>", escape(&self.heading));
        paragraphs(&mut out, &self.body);
        out.push_str(r#"<a href="/">Terug naar home</a></section>"#);
        Ok(out)
    }
}

pub(crate) fn paragraphs(out: &mut String, body: &str) {
    for para in body.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        let _ = write!(out, "<p>{}</p>", escape(para));
    }
}
