//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!     → lifecycle::startup compiles routes and pages from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table lives for the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ContactConfig, ListenerConfig, NavLinkConfig, ObservabilityConfig, PageConfig, PageKind,
    PostConfig, RouteConfig, SecurityConfig, SeoConfig, ServiceConfig, SiteConfig, SiteSection,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
