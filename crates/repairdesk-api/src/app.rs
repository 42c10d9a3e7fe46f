//! Application builder: wires services, bootstrap, and the HTTP server.

use axum::Router;
use tracing::info;

use repairdesk_core::config::AppConfig;
use repairdesk_core::error::AppError;
use repairdesk_database::Repositories;
use repairdesk_service::ensure_default_admin;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the RepairDesk server over the given repositories until Ctrl+C.
pub async fn run_server(config: AppConfig, repos: Repositories) -> Result<(), AppError> {
    info!(backend = %config.database.backend, "Starting RepairDesk server...");

    let addr = config.server.bind_address();
    let bootstrap = config.bootstrap.clone();
    let state = AppState::new(config, repos);

    if ensure_default_admin(&state.directory, &bootstrap).await? {
        info!(email = %bootstrap.email, "Bootstrap admin account ready");
    }

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("RepairDesk server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("RepairDesk server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
