//! The state the router controller owns and the dispatcher paints.

use serde::{Deserialize, Serialize};

use crate::routing::{PageId, Resolved, RouteParams};

/// What is on screen right now.
///
/// Also the hydration payload: the server serializes it into the document so
/// the client's first paint uses exactly the server's resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Normalized path the state was resolved from.
    pub path: String,
    pub page: PageId,
    #[serde(default)]
    pub params: RouteParams,
    pub uses_chrome: bool,
    /// True when no route matched and the not-found page is shown.
    #[serde(default)]
    pub not_found: bool,
}

impl From<Resolved<'_>> for NavigationState {
    fn from(resolved: Resolved<'_>) -> Self {
        Self {
            not_found: resolved.is_not_found(),
            path: resolved.path,
            page: resolved.page,
            params: resolved.params,
            uses_chrome: resolved.uses_chrome,
        }
    }
}
