//! Page abstraction and registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::pages::content::ContentError;
use crate::routing::{PageId, ResolveError, RouteParams};

/// Errors raised while producing markup.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A state or route references a page nobody registered.
    #[error("no page registered for `{0}`")]
    UnknownPage(PageId),

    /// The page needs a param the route did not capture.
    #[error("page `{page}` requires parameter `{param}`")]
    MissingParam { page: PageId, param: String },

    /// The CMS collaborator failed.
    #[error("content source failed: {0}")]
    Content(#[from] ContentError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed to encode hydration state: {0}")]
    Hydration(#[from] serde_json::Error),
}

/// A renderable unit. Receives only the captured route params.
pub trait Page: Send + Sync {
    fn render(&self, params: &RouteParams) -> Result<String, RenderError>;
}

impl<F> Page for F
where
    F: Fn(&RouteParams) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, params: &RouteParams) -> Result<String, RenderError> {
        self(params)
    }
}

/// Pages keyed by id.
#[derive(Clone, Default)]
pub struct PageRegistry {
    pages: HashMap<PageId, Arc<dyn Page>>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `page` under `id`, replacing any previous entry.
    pub fn register(&mut self, id: impl Into<PageId>, page: impl Page + 'static) -> &mut Self {
        self.pages.insert(id.into(), Arc::new(page));
        self
    }

    pub fn get(&self, id: &PageId) -> Option<&Arc<dyn Page>> {
        self.pages.get(id)
    }

    pub fn contains(&self, id: &PageId) -> bool {
        self.pages.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl fmt::Debug for PageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.pages.keys().map(PageId::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("PageRegistry").field("pages", &ids).finish()
    }
}

/// Fetch a required param or fail with [`RenderError::MissingParam`].
pub fn require_param<'p>(page: &str, params: &'p RouteParams, name: &str) -> Result<&'p str, RenderError> {
    params.get(name).ok_or_else(|| RenderError::MissingParam {
        page: PageId::new(page),
        param: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_render_closure_page() {
        let mut registry = PageRegistry::new();
        registry.register("hello", |params: &RouteParams| -> Result<String, RenderError> {
            Ok(format!("hello {}", params.get("name").unwrap_or("world")))
        });

        let page = registry.get(&PageId::new("hello")).unwrap();
        let params: RouteParams = [("name", "team")].into_iter().collect();
        assert_eq!(page.render(&params).unwrap(), "hello team");
        assert!(!registry.contains(&PageId::new("missing")));
        assert_eq!(format!("{registry:?}"), "PageRegistry { pages: [\"hello\"] }");
    }

    #[test]
    fn test_require_param() {
        let params = RouteParams::new();
        let err = require_param("post", &params, "slug").unwrap_err();
        assert_eq!(err.to_string(), "page `post` requires parameter `slug`");
    }
}
