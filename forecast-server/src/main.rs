//! Binary crate for the `forecast` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - The versioned HTTP API over `forecast-core`

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cmd.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    cmd.run().await
}
