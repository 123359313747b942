//! Entry point for the sharelink web server.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use sharelink_core::AppState;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let config = args.to_config();
    let state = AppState::from_config(&config).context("invalid configuration")?;
    info!(
        api = %config.api_base_url,
        provider_host = %config.provider_host,
        page_size = config.page_size,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        archive_concurrency = config.archive_concurrency,
        "sharelink starting"
    );

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    sharelink_core::web::serve(listener, Arc::new(state), shutdown_signal()).await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
