//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use agency_site::config::{parse_config, SiteConfig};
use agency_site::http::HttpServer;
use agency_site::lifecycle::{Shutdown, Site};
use tokio::net::TcpListener;

/// The shipped site configuration.
pub fn site_config() -> SiteConfig {
    parse_config(include_str!("../../site.toml")).unwrap()
}

/// The shipped site, fully built.
pub fn site() -> Site {
    Site::build(site_config()).unwrap()
}

/// A running server and the handle that stops it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Start `site` on an ephemeral port.
pub async fn start_server(site: Site) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new(Duration::from_secs(1));

    let server = HttpServer::new(site, None);
    let handle = tokio::spawn(server.run(listener, shutdown.clone()));

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
