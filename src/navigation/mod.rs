//! Client-side navigation subsystem.
//!
//! # Data Flow
//! ```text
//! Link activation (click)
//!     → link.rs (internal? new tab? anchor? external?)
//!     → controller.rs navigate(path, Push)
//!         → context.rs push
//!         → Synthetic event ─┐
//! Browser back/forward       │
//!     → HistoryChanged event ┤
//!                            ▼
//!     controller.rs handle_event
//!     → routing::Resolver step (redirect → context.rs replace, repeat)
//!     → commit NavigationState (state.rs), scroll to top
//!     → watch subscribers (render dispatcher) repaint
//! ```
//!
//! # Design Decisions
//! - Browser access goes through an injected `NavigationContext`
//! - Both event sources funnel into one transition
//! - Hydration reuses the server's state verbatim

pub mod context;
pub mod controller;
pub mod link;
pub mod state;

pub use context::{MemoryHistory, NavigationContext};
pub use controller::{NavigationError, NavigationEvent, NavigationMode, Phase, RouterController};
pub use link::{BypassReason, LinkActivation, LinkDisposition, Modifiers, MouseButton};
pub use state::NavigationState;
