//! REST API routes (Axum)

use crate::app::services::holiday_service::HolidayService;
use crate::app::services::provider_client::HolidayProvider;
use axum::{
    Router,
    routing::{get, post},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod error;
pub mod handlers;

/// Create the REST API router around a shared service
pub fn create_router<P>(service: Arc<HolidayService<P>>) -> Router
where
    P: HolidayProvider + 'static,
{
    Router::new()
        .route("/health", get(handlers::health))
        .route("/holidays/", post(handlers::get_holidays::<P>))
        .route("/holidays", post(handlers::get_holidays::<P>))
        .with_state(service)
}

/// Serve the API on `listener` until `shutdown` resolves
pub async fn serve<P, F>(
    listener: TcpListener,
    service: Arc<HolidayService<P>>,
    shutdown: F,
) -> anyhow::Result<()>
where
    P: HolidayProvider + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(service))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
