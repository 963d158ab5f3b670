//! # Web Server Binary Entry Point
//!
//! Serves the steganography HTTP API.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin web_server -- --config config/server.toml
//! STEGO_SECRET_KEY=<key> cargo run --bin web_server
//! ```
//!
//! The server will:
//! 1. Load configuration from the TOML file (or use defaults)
//! 2. Apply the `STEGO_SECRET_KEY` environment override
//! 3. Build the text cipher and the router
//! 4. Bind the configured address and serve requests

use clap::Parser;

use stego_backend::common::config::AppConfig;
use stego_backend::server;
use stego_backend::utils::init_logger;

/// Command-line arguments for the web server binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the server configuration file (TOML format)
    ///
    /// Example: config/server.toml
    #[arg(short, long)]
    config: Option<String>,

    /// Override the listen address from the configuration file
    #[arg(short, long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.apply_env();

    if let Some(address) = args.address {
        config.server.address = address;
    }

    server::run(config).await
}
