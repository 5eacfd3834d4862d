// ABOUTME: Entry point for the finadvisor server binary
// ABOUTME: Loads .env, reads configuration, applies command-line overrides and serves the API

use std::process;

use clap::Parser;
use tracing::error;

use finadvisor_cli::{init_tracing, run_server};
use finadvisor_core::AppConfig;

#[derive(Parser)]
#[command(name = "finadvisor")]
#[command(about = "Financial Advisor API server")]
#[command(version)]
struct Cli {
    /// Listen host (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            process::exit(1);
        }
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    init_tracing(config.debug);

    if let Err(e) = run_server(config).await {
        error!("Server error: {:#}", e);
        process::exit(1);
    }
}
