use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use agency_site::lifecycle::Site;
use agency_site::routing::RouteTarget;

#[derive(Parser)]
#[command(name = "site-cli")]
#[command(about = "Inspect the agency site's routes and renders offline", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate config, route table and page references
    Check,
    /// List the route table in match order
    Routes,
    /// Show what a path resolves to
    Resolve { path: String },
    /// Server-render a path
    Render {
        path: String,
        /// Print the full HTML document instead of a JSON summary
        #[arg(long)]
        document: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let site = Site::load(&cli.config)?;

    match cli.command {
        Commands::Check => {
            println!(
                "OK: {} routes, {} pages",
                site.table().len(),
                site.pages().len()
            );
        }
        Commands::Routes => {
            for route in site.table().routes() {
                let target = match route.target() {
                    RouteTarget::Page(page) => format!("page {page}"),
                    RouteTarget::Redirect(to) => format!("redirect {to}"),
                };
                let chrome = if route.uses_chrome() { "" } else { " (no chrome)" };
                println!("{:<28} {target}{chrome}", route.pattern().to_string());
            }
        }
        Commands::Resolve { path } => {
            let resolved = site.resolver().resolve(&path)?;
            let output = json!({
                "path": resolved.path,
                "route": resolved.route.map(|route| route.pattern().to_string()),
                "page": resolved.page,
                "params": resolved.params,
                "uses_chrome": resolved.uses_chrome,
                "not_found": resolved.is_not_found(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Render { path, document } => {
            let (page, html) = site.render_document(&path)?;
            if document {
                println!("{html}");
            } else {
                println!("{}", serde_json::to_string_pretty(&page)?);
            }
        }
    }

    Ok(())
}
