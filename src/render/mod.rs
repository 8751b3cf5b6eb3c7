//! Rendering subsystem.
//!
//! # Data Flow
//! ```text
//! NavigationState (page, params, chrome decision)
//!     → dispatcher.rs (look up page, render with params)
//!     → page.rs (Page trait, PageRegistry)
//!     → chrome.rs (wrap in header/footer/contact widget when requested)
//!     → markup string
//! ```
//!
//! # Design Decisions
//! - Pages are opaque to the router; they only ever see params
//! - Rendering is synchronous and deterministic for a given state
//! - Errors propagate to the caller; nothing is retried or swallowed

pub mod chrome;
pub mod dispatcher;
pub mod page;

pub use chrome::{Chrome, SiteChrome};
pub use dispatcher::RenderDispatcher;
pub use page::{Page, PageRegistry, RenderError};

/// HTML-escape untrusted text for element content or attribute values.
pub fn escape(text: &str) -> String {
    askama_escape::escape(text, askama_escape::Html).to_string()
}
