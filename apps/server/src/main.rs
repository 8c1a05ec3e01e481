//! Poplog demo server
//!
//! Loads `.env`, builds the logging service, routes `tracing` output and
//! panics to the app logger and serves a few routes behind the HTTP logger.

mod config;
mod routes;

use anyhow::Context;
use tracing::{info, warn};

use poplog_http::LoggingService;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    let service = LoggingService::new(config.logger_options(), config.environment)
        .context("Invalid logger configuration")?;

    if let Err(e) = service.install_global() {
        eprintln!("Warning: Failed to install global subscriber: {}", e);
    }
    service.route_panics();

    let addr = config.addr();
    info!("Starting {} on {} ({:?})", config.name, addr, config.environment);
    info!(
        "Log files: {}",
        service.factory().log_file_path(service.logger().id()).display()
    );

    let router = routes::build_router(service.http_logger(), true);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Ready to accept connections");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
