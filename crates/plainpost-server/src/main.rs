//! plainpost-server - normalize editor HTML over HTTP

mod config;
mod logging;
mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use plainpost::Normalizer;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    logging::init(&config.log_level);

    let normalizer = Arc::new(Normalizer::with_options(config.options()));

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        addr = %config.bind,
        bold = ?config.bold,
        rendering = ?config.rendering,
        "listening"
    );

    axum::serve(listener, routes::router(normalizer)).await?;
    Ok(())
}
