//! Shared site chrome: header, navigation, footer and contact widget.

use std::fmt::Write;

use crate::config::{ContactConfig, NavLinkConfig, SiteSection};
use crate::render::escape;

/// Wraps a rendered page in site-wide markup.
pub trait Chrome: Send + Sync {
    /// Place `slot` inside the chrome.
    fn wrap(&self, slot: &str) -> String;
}

/// The agency's chrome, built from the `[site]` config section.
#[derive(Debug, Clone)]
pub struct SiteChrome {
    name: String,
    nav: Vec<NavLinkConfig>,
    contact: ContactConfig,
}

impl SiteChrome {
    pub fn from_config(site: &SiteSection) -> Self {
        Self {
            name: site.name.clone(),
            nav: site.nav.clone(),
            contact: site.contact.clone(),
        }
    }

    fn header(&self, out: &mut String) {
        let _ = write!(
            out,
            r#"<header class="site-header"><a class="brand" href="/">{}</a><nav>"#,
            escape(&self.name)
        );
        for link in &self.nav {
            let _ = write!(
                out,
                r#"<a href="{}">{}</a>"#,
                escape(&link.href),
                escape(&link.label)
            );
        }
        out.push_str("</nav></header>");
    }

    fn contact_widget(&self, out: &mut String) {
        let contact = &self.contact;
        if contact.email.is_none() && contact.phone.is_none() && contact.cta_href.is_none() {
            return;
        }

        out.push_str(r#"<aside class="contact-widget">"#);
        if let Some(email) = &contact.email {
            let email = escape(email);
            let _ = write!(out, r#"<a href="mailto:{email}">{email}</a>"#);
        }
        if let Some(phone) = &contact.phone {
            let _ = write!(out, r#"<a href="tel:{0}">{0}</a>"#, escape(phone));
        }
        if let Some(href) = &contact.cta_href {
            let label = contact.cta_label.as_deref().unwrap_or("Contact");
            let _ = write!(
                out,
                r#"<a class="cta" href="{}">{}</a>"#,
                escape(href),
                escape(label)
            );
        }
        out.push_str("</aside>");
    }
}

impl Chrome for SiteChrome {
    fn wrap(&self, slot: &str) -> String {
        let mut out = String::with_capacity(slot.len() + 512);
        self.header(&mut out);
        out.push_str(r#"<main id="content">"#);
        out.push_str(slot);
        out.push_str("</main>");
        self.contact_widget(&mut out);
        let _ = write!(
            out,
            r#"<footer class="site-footer">&copy; {}</footer>"#,
            escape(&self.name)
        );
        out
    }
}
