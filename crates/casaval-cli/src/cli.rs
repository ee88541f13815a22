//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// casaval - Housing price prediction service
#[derive(Parser)]
#[command(name = "casaval")]
#[command(about = "Serve real-time housing price predictions from a trained model", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the model artifacts (model.json, scaler.json,
    /// features.json)
    #[arg(long, default_value = "model", global = true)]
    pub model_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Keep at most this many history entries (default: unbounded)
        #[arg(long)]
        history_capacity: Option<usize>,
    },

    /// Print model metadata (label, features, importances)
    Info,
}
