//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (nosniff, frame denial, referrer policy)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Headers are set only when a handler has not set them itself
//! - Switchable from config for deployments behind a CDN that adds them

pub mod headers;

pub use headers::apply_security_headers;
