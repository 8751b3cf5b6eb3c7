//! Agency marketing site server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ lifecycle::Site ──▶ ssr::renderer
//!                                                              │
//!                          routing::Resolver ◀─────────────────┤
//!                          (match, redirects, not-found)       │
//!                                                              ▼
//!     Client Response                                   render::dispatcher
//!     ◀────────────── http::response ◀── ssr::document ◀── pages + chrome
//!
//!     Browser: navigation::RouterController shares the same Resolver and
//!     hydrates from the state embedded by ssr::document.
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use agency_site::config::load_config;
use agency_site::http::HttpServer;
use agency_site::lifecycle::{spawn_signal_handler, Shutdown, Site};
use agency_site::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "agency-site")]
#[command(about = "Serve the agency marketing site", long_about = None)]
struct Args {
    /// Path to the site configuration
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Override the configured bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(&args.config)?;
    logging::init(&config.observability);

    tracing::info!("agency-site v{} starting", env!("CARGO_PKG_VERSION"));

    let bind_address = args
        .bind
        .unwrap_or_else(|| config.listener.bind_address.clone());
    let metrics_enabled = config.observability.metrics_enabled;
    let grace = std::time::Duration::from_secs(config.timeouts.shutdown_secs);

    tracing::info!(
        config = %args.config.display(),
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let site = Site::build(config)?;

    let metrics_handle = if metrics_enabled {
        match metrics::install_recorder() {
            Ok(handle) => Some(handle),
            Err(error) => {
                tracing::error!(error = %error, "Failed to install metrics recorder");
                None
            }
        }
    } else {
        None
    };

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new(grace);
    spawn_signal_handler(shutdown.clone());

    HttpServer::new(site, metrics_handle)
        .run(listener, shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
