//! `serve` command: run the HTTP service until Ctrl+C

use crate::api;
use crate::cli::args::ServeArgs;
use crate::cli::commands::shared::{build_service, load_configuration, setup_logging};
use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub async fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    setup_logging(&args.common);

    let mut config = load_configuration(&args.common)?;
    if let Some(bind_addr) = args.bind_addr {
        config = config.with_bind_addr(bind_addr);
    }

    let service = Arc::new(build_service(&config)?);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    info!("Holiday fetcher starting");
    api::serve(listener, service, shutdown_signal()).await
}

/// Resolve on Ctrl+C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
