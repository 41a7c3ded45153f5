pub mod api;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod state;

pub use state::ApiState;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Router, middleware as axum_middleware};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerSettings;
use crate::infra::db::PostgresStore;
use crate::infra::error::InfraError;

/// The full content surface: API routes plus generated pages, behind the
/// shared response logger.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .merge(api::build_api_router())
        .merge(pages::build_pages_router())
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::log_responses))
}

/// Store health probe, mounted separately so the content router stays
/// store-agnostic.
pub fn health_router(store: Arc<PostgresStore>) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .with_state(store)
}

async fn health(State(store): State<Arc<PostgresStore>>) -> impl IntoResponse {
    match store.health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "store unavailable"),
    }
}

pub async fn serve(settings: &ServerSettings, router: Router) -> Result<(), InfraError> {
    let addr = settings
        .socket_addr()
        .map_err(|err| InfraError::configuration(format!("invalid listen address: {err}")))?;
    let listener = TcpListener::bind(addr).await?;
    info!(target: "vetrina::http", %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(InfraError::Io)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(target: "vetrina::http", error = %err, "could not install shutdown signal handler");
    }
}
