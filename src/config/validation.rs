//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (not-found page is declared)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect duplicate page ids and content slugs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Route patterns are checked when the route table is compiled, not here

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::SiteConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("site.base_url `{0}` is not an http(s) URL")]
    BaseUrl(String),

    #[error("site.name must not be empty")]
    EmptySiteName,

    #[error("site.not_found_page `{0}` is not a declared page")]
    NotFoundPageMissing(String),

    #[error("site.contact.form_action `{0}` is not an absolute http(s) URL")]
    FormAction(String),

    #[error("nav link `{label}` has invalid href `{href}`")]
    NavHref { label: String, href: String },

    #[error("page id `{0}` is declared more than once")]
    DuplicatePage(String),

    #[error("service slug `{0}` is declared more than once")]
    DuplicateService(String),

    #[error("post slug `{0}` is declared more than once")]
    DuplicatePost(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.log_level `{0}` is not a log level")]
    LogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    match Url::parse(&config.site.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::BaseUrl(config.site.base_url.clone())),
    }

    if config.site.name.trim().is_empty() {
        errors.push(ValidationError::EmptySiteName);
    }

    if let Some(action) = &config.site.contact.form_action {
        match Url::parse(action) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => errors.push(ValidationError::FormAction(action.clone())),
        }
    }

    for link in &config.site.nav {
        if !link.href.starts_with('/') && Url::parse(&link.href).is_err() {
            errors.push(ValidationError::NavHref {
                label: link.label.clone(),
                href: link.href.clone(),
            });
        }
    }

    let mut page_ids = HashSet::new();
    for page in &config.pages {
        if !page_ids.insert(page.id.as_str()) {
            errors.push(ValidationError::DuplicatePage(page.id.clone()));
        }
    }
    if !page_ids.contains(config.site.not_found_page.as_str()) {
        errors.push(ValidationError::NotFoundPageMissing(config.site.not_found_page.clone()));
    }

    let mut slugs = HashSet::new();
    for service in &config.services {
        if !slugs.insert(service.slug.as_str()) {
            errors.push(ValidationError::DuplicateService(service.slug.clone()));
        }
    }

    let mut slugs = HashSet::new();
    for post in &config.posts {
        if !slugs.insert(post.slug.as_str()) {
            errors.push(ValidationError::DuplicatePost(post.slug.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
