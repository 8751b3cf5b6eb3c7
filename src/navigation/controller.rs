//! Router controller.
//!
//! # Responsibilities
//! - Own the current `NavigationState`
//! - Keep it in step with the navigation context (address bar) and back
//! - Intercept same-origin, same-tab link activations
//! - Follow redirect routes with history replacement
//!
//! # Design Decisions
//! - One transition path: every navigation, browser- or app-initiated,
//!   ends in `handle_event`, which re-reads the context's location
//! - `navigate(path, mode)` is the only place history is written for
//!   in-app navigations; link clicks and redirects go through it or
//!   through `replace`, never through a second push
//! - Transitions are synchronous; `Navigating` never outlives one call

use tokio::sync::watch;
use thiserror::Error;
use url::Url;

use crate::navigation::context::NavigationContext;
use crate::navigation::link::{classify, LinkActivation, LinkDisposition};
use crate::navigation::state::NavigationState;
use crate::observability::metrics;
use crate::routing::{normalize_path, strip_query_and_fragment, ResolveError, Resolver, Step};

/// How a navigation writes history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    Push,
    Replace,
}

/// Signals that trigger a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Browser back/forward changed the location.
    HistoryChanged,
    /// Dispatched by the controller after it wrote history itself.
    Synthetic,
}

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Navigating,
}

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Keeps the rendered page synchronized with history.
pub struct RouterController<C> {
    context: C,
    resolver: Resolver,
    origin: Url,
    phase: Phase,
    state: watch::Sender<NavigationState>,
}

impl<C: NavigationContext> RouterController<C> {
    /// Resolve the context's current location and start from there.
    pub fn new(mut context: C, resolver: Resolver, origin: Url) -> Result<Self, NavigationError> {
        let initial = settle(&mut context, &resolver)?;
        tracing::debug!(path = %initial.path, page = %initial.page, "Router controller started");
        Ok(Self::with_state(context, resolver, origin, initial))
    }

    /// Start from a server-provided state without re-running the matcher.
    pub fn hydrate(context: C, resolver: Resolver, origin: Url, state: NavigationState) -> Self {
        tracing::debug!(path = %state.path, page = %state.page, "Router controller hydrated");
        Self::with_state(context, resolver, origin, state)
    }

    fn with_state(context: C, resolver: Resolver, origin: Url, state: NavigationState) -> Self {
        let (state, _) = watch::channel(state);
        Self {
            context,
            resolver,
            origin,
            phase: Phase::Idle,
            state,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> NavigationState {
        self.state.borrow().clone()
    }

    /// Observe every committed state.
    pub fn subscribe(&self) -> watch::Receiver<NavigationState> {
        self.state.subscribe()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Write history for `path`, then run the shared transition.
    pub fn navigate(&mut self, path: &str, mode: NavigationMode) -> Result<(), NavigationError> {
        match mode {
            NavigationMode::Push => self.context.push(path),
            NavigationMode::Replace => self.context.replace(path),
        }
        self.handle_event(NavigationEvent::Synthetic)
    }

    /// Handle a click on an anchor. Internal links are pushed and resolved;
    /// everything else is left to the browser.
    pub fn activate_link(&mut self, link: &LinkActivation) -> Result<LinkDisposition, NavigationError> {
        let current = self.context.current_path();
        match classify(link, &self.origin, &current) {
            Ok(path) => {
                self.navigate(&path, NavigationMode::Push)?;
                Ok(LinkDisposition::Intercepted { path })
            }
            Err(reason) => {
                tracing::trace!(href = %link.href, ?reason, "Link left to the browser");
                Ok(LinkDisposition::PassThrough(reason))
            }
        }
    }

    /// The single transition path. Resolves the context's location,
    /// following redirects, commits the new state and scrolls to the top.
    ///
    /// On a redirect cycle the previous state stays in place.
    pub fn handle_event(&mut self, event: NavigationEvent) -> Result<(), NavigationError> {
        self.phase = Phase::Navigating;
        let result = settle(&mut self.context, &self.resolver);
        self.phase = Phase::Idle;

        let next = match result {
            Ok(next) => next,
            Err(e) => {
                tracing::error!(?event, error = %e, "Navigation aborted");
                return Err(e);
            }
        };

        tracing::debug!(
            ?event,
            path = %next.path,
            page = %next.page,
            not_found = next.not_found,
            "Navigation committed"
        );
        metrics::record_navigation(next.not_found);

        self.state.send_replace(next);
        self.context.scroll_to_top();
        Ok(())
    }
}

/// Resolve the context's location, replacing history for each redirect hop.
fn settle<C: NavigationContext>(
    context: &mut C,
    resolver: &Resolver,
) -> Result<NavigationState, NavigationError> {
    let mut visited: Vec<String> = Vec::new();

    loop {
        let location = context.current_path();
        let path = normalize_path(strip_query_and_fragment(&location));
        if visited.contains(&path) {
            visited.push(path);
            return Err(ResolveError::RedirectCycle { chain: visited }.into());
        }
        visited.push(path);

        match resolver.step(&location) {
            Step::Render(resolved) => return Ok(resolved.into()),
            Step::Redirect(target) => {
                tracing::debug!(from = %location, to = %target, "Following redirect");
                context.replace(target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::navigation::context::MemoryHistory;
    use crate::navigation::link::BypassReason;
    use crate::routing::{PageId, RouteDefinition, RouteTable};

    fn resolver() -> Resolver {
        let table = RouteTable::new(vec![
            RouteDefinition::page("/", "home").unwrap(),
            RouteDefinition::page("/contact", "contact").unwrap(),
            RouteDefinition::page("/landing", "landing").unwrap().without_chrome(),
            RouteDefinition::page("/blog/:slug", "blog-post").unwrap(),
            RouteDefinition::redirect("/projecten", "/succesverhalen").unwrap(),
            RouteDefinition::page("/succesverhalen", "stories").unwrap(),
        ])
        .unwrap();
        Resolver::new(Arc::new(table), PageId::new("not-found"))
    }

    fn origin() -> Url {
        Url::parse("https://studio.example").unwrap()
    }

    fn controller_at(path: &str) -> RouterController<MemoryHistory> {
        RouterController::new(MemoryHistory::with_initial_path(path), resolver(), origin()).unwrap()
    }

    #[test]
    fn test_initial_resolution() {
        let controller = controller_at("/blog/hallo?utm=mail");
        let state = controller.state();
        assert_eq!(state.page.as_str(), "blog-post");
        assert_eq!(state.params.get("slug"), Some("hallo"));
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.context().scroll_resets(), 0);
    }

    #[test]
    fn test_initial_redirect_replaces_entry() {
        let controller = controller_at("/projecten");
        assert_eq!(controller.state().page.as_str(), "stories");
        assert_eq!(controller.context().entries(), &["/succesverhalen"]);
    }

    #[test]
    fn test_hydrate_uses_given_state() {
        let given = NavigationState {
            path: "/contact".into(),
            page: PageId::new("contact"),
            params: Default::default(),
            uses_chrome: true,
            not_found: false,
        };
        // The history disagrees on purpose: hydration must not re-match.
        let controller = RouterController::hydrate(
            MemoryHistory::with_initial_path("/elsewhere"),
            resolver(),
            origin(),
            given.clone(),
        );
        assert_eq!(controller.state(), given);
    }

    #[test]
    fn test_link_click_pushes_and_scrolls() {
        let mut controller = controller_at("/");
        let disposition = controller
            .activate_link(&LinkActivation::click("/contact"))
            .unwrap();
        assert_eq!(disposition, LinkDisposition::Intercepted { path: "/contact".into() });
        assert_eq!(controller.state().page.as_str(), "contact");
        assert_eq!(controller.context().entries(), &["/", "/contact"]);
        assert_eq!(controller.context().scroll_resets(), 1);
    }

    #[test]
    fn test_external_link_passes_through() {
        let mut controller = controller_at("/");
        let before = controller.state();
        let disposition = controller
            .activate_link(&LinkActivation::click("https://elsewhere.example/"))
            .unwrap();
        assert_eq!(disposition, LinkDisposition::PassThrough(BypassReason::External));
        assert_eq!(controller.state(), before);
        assert_eq!(controller.context().len(), 1);
    }

    #[test]
    fn test_redirect_replaces_instead_of_pushing() {
        let mut controller = controller_at("/contact");
        controller.navigate("/projecten", NavigationMode::Push).unwrap();

        assert_eq!(controller.state().page.as_str(), "stories");
        assert_eq!(controller.state().path, "/succesverhalen");
        assert_eq!(controller.context().entries(), &["/contact", "/succesverhalen"]);

        // Back from the redirect target lands on the page before it.
        assert!(controller.context_mut().go_back());
        controller.handle_event(NavigationEvent::HistoryChanged).unwrap();
        assert_eq!(controller.state().page.as_str(), "contact");
    }

    #[test]
    fn test_not_found_is_a_state() {
        let mut controller = controller_at("/");
        controller.navigate("/bestaat-niet", NavigationMode::Push).unwrap();
        let state = controller.state();
        assert!(state.not_found);
        assert_eq!(state.page.as_str(), "not-found");
        assert!(state.params.is_empty());
        assert!(state.uses_chrome);
    }

    #[test]
    fn test_chrome_decision_follows_route() {
        let mut controller = controller_at("/");
        controller.navigate("/landing", NavigationMode::Push).unwrap();
        assert!(!controller.state().uses_chrome);
    }

    #[test]
    fn test_subscribers_see_commits() {
        let mut controller = controller_at("/");
        let mut rx = controller.subscribe();
        assert!(!rx.has_changed().unwrap());
        controller.navigate("/contact", NavigationMode::Push).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().page.as_str(), "contact");
    }

    #[test]
    fn test_runtime_redirect_cycle_keeps_state() {
        let table = RouteTable::new_unchecked(vec![
            RouteDefinition::page("/", "home").unwrap(),
            RouteDefinition::redirect("/a", "/b").unwrap(),
            RouteDefinition::redirect("/b", "/a").unwrap(),
        ]);
        let resolver = Resolver::new(Arc::new(table), PageId::new("not-found"));
        let mut controller =
            RouterController::new(MemoryHistory::default(), resolver, origin()).unwrap();

        let err = controller.navigate("/a", NavigationMode::Push).unwrap_err();
        assert!(matches!(err, NavigationError::Resolve(ResolveError::RedirectCycle { .. })));
        assert_eq!(controller.state().page.as_str(), "home");
        assert_eq!(controller.phase(), Phase::Idle);
    }
}
