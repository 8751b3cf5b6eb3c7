//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Table Compilation (at startup):
//!     RouteConfig[]
//!     → pattern.rs (parse segments, reject malformed patterns)
//!     → table.rs (reject unreachable routes and bad redirect chains)
//!     → Freeze as immutable RouteTable
//!
//! Navigation / Request:
//!     raw path
//!     → resolve.rs (strip query/fragment, normalize)
//!     → matcher.rs (exact pass, then parameterized pass)
//!     → Return: page + params, redirect target, or not-found
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex: segment-wise literal comparison only
//! - Deterministic: same input always matches same route
//! - Literal routes beat parameterized ones; otherwise first match wins

pub mod matcher;
pub mod pattern;
pub mod resolve;
pub mod table;

pub use matcher::{match_path, MatchResult};
pub use pattern::{normalize_path, strip_query_and_fragment, PatternError, RoutePattern, Segment};
pub use resolve::{ResolveError, Resolved, Resolver, Step};
pub use table::{
    describe_errors, PageId, RouteDefinition, RouteMeta, RouteParams, RouteTable, RouteTableError,
    RouteTarget,
};
