//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing, rendering and HTTP produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and histograms via the metrics facade)
//!
//! Consumers:
//!     → stdout (fmt subscriber, filtered by RUST_LOG or config)
//!     → /metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - Metric calls are no-ops until a recorder is installed, so library code
//!   and tests record freely

pub mod logging;
pub mod metrics;
