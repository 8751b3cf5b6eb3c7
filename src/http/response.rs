//! Mapping render outcomes onto HTTP responses.
//!
//! - Found → 200, NotFound → 404, both with the full document
//! - A followed redirect → 308 with `Location`
//! - Any render failure → 500 with a plain body

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::ssr::{RenderStatus, RenderedPage};

/// Status code for a rendered page.
pub fn status_for(page: &RenderedPage) -> StatusCode {
    match page.status {
        RenderStatus::Found => StatusCode::OK,
        RenderStatus::NotFound => StatusCode::NOT_FOUND,
    }
}

/// A complete HTML document response.
pub fn page_response(page: &RenderedPage, html: String) -> Response {
    (status_for(page), Html(html)).into_response()
}

/// Permanent redirect to `location`, keeping the request's query string.
pub fn redirect_response(location: &str, query: Option<&str>) -> Response {
    let location = match query {
        Some(query) if !query.is_empty() => format!("{location}?{query}"),
        _ => location.to_string(),
    };
    match HeaderValue::from_str(&location) {
        Ok(value) => (StatusCode::PERMANENT_REDIRECT, [(header::LOCATION, value)]).into_response(),
        Err(_) => error_response(),
    }
}

/// Generic failure; details go to the log, not the client.
pub fn error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_keeps_query() {
        let response = redirect_response("/succesverhalen", Some("ref=nav"));
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/succesverhalen?ref=nav"
        );
    }

    #[test]
    fn test_redirect_without_query() {
        let response = redirect_response("/succesverhalen", Some(""));
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/succesverhalen");
    }
}
