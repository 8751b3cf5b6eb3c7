//! Blog pages backed by the content source.

use std::fmt::Write;
use std::sync::Arc;

use crate::pages::basic::paragraphs;
use crate::pages::content::ContentSource;
use crate::render::page::require_param;
use crate::render::{escape, Page, RenderError};
use crate::routing::RouteParams;

/// Post listing, newest first.
pub struct BlogIndexPage {
    heading: String,
    content: Arc<dyn ContentSource>,
}

impl BlogIndexPage {
    pub fn new(heading: impl Into<String>, content: Arc<dyn ContentSource>) -> Self {
        Self {
            heading: heading.into(),
            content,
        }
    }
}

impl Page for BlogIndexPage {
    fn render(&self, _params: &RouteParams) -> Result<String, RenderError> {
        let posts = self.content.posts()?;

        let mut out = String::from(r#"<section class="page blog">"#);
        let _ = write!(out, "<h1>{}</h1>", escape(&self.heading));
        if posts.is_empty() {
            out.push_str("<p>Nog geen artikelen.</p>");
        }
        out.push_str(r#"<ul class="cards">"#);
        for post in &posts {
            let _ = write!(
                out,
                r#"<li class="card"><a href="/blog/{}"><h2>{}</h2><time>{}</time><p>{}</p></a></li>"#,
                escape(&post.slug),
                escape(&post.title),
                escape(&post.published),
                escape(&post.summary)
            );
        }
        out.push_str("</ul></section>");
        Ok(out)
    }
}

/// A single post, selected by the `slug` param.
pub struct BlogPostPage {
    id: String,
    content: Arc<dyn ContentSource>,
}

impl BlogPostPage {
    pub fn new(id: impl Into<String>, content: Arc<dyn ContentSource>) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }
}

impl Page for BlogPostPage {
    fn render(&self, params: &RouteParams) -> Result<String, RenderError> {
        let slug = require_param(&self.id, params, "slug")?;

        let Some(post) = self.content.post(slug)? else {
            return Ok(r#"<article class="post missing"><h1>Artikel niet gevonden</h1><a href="/blog">Alle artikelen</a></article>"#.to_string());
        };

        let mut out = String::from(r#"<article class="post">"#);
        let _ = write!(
            out,
            "<h1>{}</h1><time>{}</time>",
            escape(&post.title),
            escape(&post.published)
        );
        if let Some(image) = &post.image {
            let _ = write!(out, r#"<img src="{}" alt="">"#, escape(image));
        }
        paragraphs(&mut out, &post.body);
        out.push_str("</article>");
        Ok(out)
    }
}
