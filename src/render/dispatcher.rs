//! Render dispatch: page lookup plus optional chrome.

use std::sync::Arc;

use crate::navigation::NavigationState;
use crate::render::chrome::Chrome;
use crate::render::page::{PageRegistry, RenderError};

/// Stateless composition of a navigation state into markup.
#[derive(Clone)]
pub struct RenderDispatcher {
    pages: Arc<PageRegistry>,
    chrome: Arc<dyn Chrome>,
}

impl RenderDispatcher {
    pub fn new(pages: Arc<PageRegistry>, chrome: Arc<dyn Chrome>) -> Self {
        Self { pages, chrome }
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    /// Render the page in `state`, wrapped in chrome when the route asks for it.
    pub fn render(&self, state: &NavigationState) -> Result<String, RenderError> {
        let page = self
            .pages
            .get(&state.page)
            .ok_or_else(|| RenderError::UnknownPage(state.page.clone()))?;

        let body = page.render(&state.params)?;
        if state.uses_chrome {
            Ok(self.chrome.wrap(&body))
        } else {
            Ok(body)
        }
    }
}
