//! Server-side rendering subsystem.
//!
//! # Data Flow
//! ```text
//! Request URL
//!     → renderer.rs (resolve with the shared Resolver, render via dispatcher)
//!     → seo.rs (title, description, canonical, og:image from route meta)
//!     → document.rs (HTML shell + hydration payload)
//!     → HTTP response
//! ```
//!
//! # Design Decisions
//! - Server and client resolve through the same `Resolver`, so the first
//!   client paint never disagrees with the server
//! - The hydration payload is the client's `NavigationState`, not a copy

pub mod document;
pub mod renderer;
pub mod seo;

pub use document::{extract_hydration, hydration_payload, parse_hydration, DocumentShell, HYDRATION_SCRIPT_ID};
pub use renderer::{RenderStatus, RenderedPage, ServerRenderer};
pub use seo::{SeoDefaults, SeoDescriptor};
