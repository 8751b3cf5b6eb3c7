//! HTTP-level tests for the server-rendered site.

use std::time::Duration;

use axum::http::StatusCode;

use agency_site::config::{PageConfig, PageKind, RouteConfig};
use agency_site::lifecycle::Site;
use agency_site::ssr::extract_hydration;

mod common;

#[tokio::test]
async fn test_page_served_with_metadata() {
    let server = common::start_server(common::site()).await;
    let client = common::client();

    let res = client.get(server.url("/diensten/websites")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("x-request-id").is_some());
    assert_eq!(res.headers().get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(res.headers().get("x-frame-options").unwrap(), "DENY");

    let body = res.text().await.unwrap();
    assert!(body.contains("<title>Dienst: websites | Studio Noord</title>"));
    assert!(body.contains(r#"<link rel="canonical" href="https://studionoord.example/diensten/websites">"#));
    assert!(body.contains("<h1>Websites</h1>"));

    let state = extract_hydration(&body).unwrap().unwrap();
    assert_eq!(state.page.as_str(), "service");
    assert_eq!(state.params.get("service"), Some("websites"));

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_path_is_404_with_page() {
    let server = common::start_server(common::site()).await;

    let res = common::client()
        .get(server.url("/bestaat/niet"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.text().await.unwrap();
    assert!(body.contains("Pagina niet gevonden"));
    assert!(extract_hydration(&body).unwrap().unwrap().not_found);

    server.stop().await;
}

#[tokio::test]
async fn test_redirect_route_is_308() {
    let server = common::start_server(common::site()).await;

    let res = common::client()
        .get(server.url("/projecten?ref=nav"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(res.headers().get("location").unwrap(), "/succesverhalen?ref=nav");

    server.stop().await;
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = common::start_server(common::site()).await;

    let res = common::client()
        .get(server.url("/contact"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), "trace-me");

    server.stop().await;
}

#[tokio::test]
async fn test_contact_form_posts_off_site() {
    let server = common::start_server(common::site()).await;

    let body = common::client()
        .get(server.url("/contact"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(r#"action="https://forms.studionoord.example/lead""#));
    assert!(!body.contains(r#"action="/contact""#));

    server.stop().await;
}

#[tokio::test]
async fn test_render_failure_is_500() {
    let mut config = common::site_config();
    // A blog post page on a route without the `slug` param cannot render.
    config.pages.push(PageConfig {
        id: "broken".into(),
        kind: PageKind::BlogPost,
        heading: String::new(),
        body: String::new(),
    });
    config.routes.push(RouteConfig::page("/kapot", "broken"));
    let server = common::start_server(Site::build(config).unwrap()).await;

    let res = common::client().get(server.url("/kapot")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    server.stop().await;
}

#[tokio::test]
async fn test_health_and_disabled_metrics() {
    let server = common::start_server(common::site()).await;
    let client = common::client();

    let res = client.get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let res = client.get(server.url("/metrics")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_security_headers_can_be_disabled() {
    let mut config = common::site_config();
    config.security.enable_headers = false;
    let server = common::start_server(Site::build(config).unwrap()).await;

    let res = common::client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("x-frame-options").is_none());

    server.stop().await;
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let server = common::start_server(common::site()).await;
    let addr = server.addr;
    server.stop().await;

    let result = common::client()
        .get(format!("http://{addr}/"))
        .send()
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_shutdown_before_first_poll() {
    let server = common::start_server(common::site()).await;
    server.shutdown.trigger();

    let finished = tokio::time::timeout(Duration::from_secs(5), server.handle).await;
    assert!(matches!(finished, Ok(Ok(Ok(())))));

    let result = common::client()
        .get(format!("http://{}/", server.addr))
        .send()
        .await;
    assert!(result.is_err());
}
