//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Compile routes → Build pages → Cross-check → Site
//!
//! Shutdown (shutdown.rs):
//!     Trigger (latched flag) → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routes and pages, listeners last
//! - Shutdown has a grace period: forced exit after the deadline
//! - No reload: the route table is fixed for the life of the process

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::{spawn_signal_handler, wait_for_signal};
pub use startup::{Site, StartupError};
