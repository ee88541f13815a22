//! casaval CLI - Housing price prediction service
//!
//! Usage:
//!   casaval serve --port 5000      Start the web server
//!   casaval info                   Print model metadata

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            static_dir,
            history_capacity,
        } => {
            commands::cmd_serve(
                &cli.model_dir,
                &host,
                port,
                static_dir.as_deref(),
                history_capacity,
            )
            .await
        }
        Commands::Info => commands::cmd_info(&cli.model_dir),
    }
}
