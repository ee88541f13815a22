//! Command implementations for the casaval CLI

use std::path::Path;

use anyhow::{Context, Result};
use tracing::error;

use casaval_core::InferenceEngine;
use casaval_server::ServerConfig;

pub async fn cmd_serve(
    model_dir: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    history_capacity: Option<usize>,
) -> Result<()> {
    println!("Starting casaval web server...");
    println!("   Model artifacts: {}", model_dir.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if let Some(cap) = history_capacity {
        println!("   History capacity: {} entries", cap);
    }

    // Artifact loading happens once, before the listener binds. A failed load
    // starts the server in the documented unavailable state instead of
    // exiting, so health and info endpoints stay reachable.
    let engine = match InferenceEngine::load(model_dir) {
        Ok(engine) => Some(engine),
        Err(e) => {
            error!(
                "Failed to load model artifacts from {}: {}",
                model_dir.display(),
                e
            );
            println!("   WARNING: model not loaded - predict endpoints will answer 503");
            None
        }
    };

    // Allowed CORS origins from environment (comma-separated)
    let allowed_origins: Vec<String> = std::env::var("CASAVAL_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let config = ServerConfig {
        allowed_origins,
        history_capacity,
    };

    casaval_server::serve(
        engine,
        host,
        port,
        static_dir.and_then(|p| p.to_str()),
        config,
    )
    .await
}

pub fn cmd_info(model_dir: &Path) -> Result<()> {
    let engine = InferenceEngine::load(model_dir).with_context(|| {
        format!("failed to load model artifacts from {}", model_dir.display())
    })?;

    let schema = engine.schema();
    println!("Model: {}", engine.model_label());
    println!("Features ({}):", schema.width());
    for field in schema.top_features(schema.width()) {
        println!("   {:<12} {:>6.1}%", field.name, field.importance * 100.0);
    }

    Ok(())
}
