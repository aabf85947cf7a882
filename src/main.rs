//! Evidence - web viewer for citation-annotated answers.
//!
//! Serves the question form, the annotated answer tabs and a small JSON API
//! in front of a remote answering service. See `lib.rs` for the modules and
//! `Config` for the environment variables read at startup.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use evidence::{build_router, url_validator, AppState, Config};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load env
    let _ = dotenv::dotenv();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    if url_validator::is_local(&config.api_url) {
        info!(api_url = %config.api_url, "Answering service is local");
    } else {
        warn!(api_url = %config.api_url, "Answering service is remote; questions and file paths are sent over the network");
    }

    let bind_addr = config.bind_addr;
    let top_k = config.top_k;
    let state = Arc::new(AppState::new(config)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    info!(top_k, "Evidence server running at http://{}", bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
