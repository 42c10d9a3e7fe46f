//! Route definitions for the RepairDesk HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use axum::http::StatusCode;
use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use repairdesk_core::config::ServerConfig;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(client_routes())
        .merge(machine_routes())
        .merge(dashboard_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = timeout_layer(&state.config.server);

    Router::new()
        .nest("/api", api_routes)
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Requests outliving `request_timeout_seconds` answer 408.
fn timeout_layer(server: &ServerConfig) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, server.request_timeout())
}

/// Sign-in
fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(handlers::auth::login))
}

/// Staff accounts
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route("/users/role/{role}", get(handlers::user::list_by_role))
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
}

/// Customers
fn client_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clients",
            get(handlers::client::list_clients).post(handlers::client::create_client),
        )
        .route("/clients/search", get(handlers::client::search_clients))
        .route(
            "/clients/{id}",
            get(handlers::client::get_client)
                .put(handlers::client::update_client)
                .delete(handlers::client::delete_client),
        )
}

/// Repair jobs
fn machine_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/machines",
            get(handlers::machine::list_machines).post(handlers::machine::create_machine),
        )
        .route("/machines/search", get(handlers::machine::search_machines))
        .route(
            "/machines/statut/{statut}",
            get(handlers::machine::list_by_status),
        )
        .route(
            "/machines/client/{id}",
            get(handlers::machine::list_by_client),
        )
        .route(
            "/machines/secretaire/{id}",
            get(handlers::machine::list_by_secretary),
        )
        .route(
            "/machines/technicien/{id}",
            get(handlers::machine::list_by_technician),
        )
        .route(
            "/machines/{id}",
            get(handlers::machine::get_machine)
                .put(handlers::machine::update_machine)
                .delete(handlers::machine::delete_machine),
        )
}

/// Dashboard totals
fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(handlers::dashboard::stats))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_slow_request_times_out() {
        let server = ServerConfig {
            request_timeout_seconds: 1,
            ..ServerConfig::default()
        };
        let app: Router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(timeout_layer(&server));

        let response = app
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
