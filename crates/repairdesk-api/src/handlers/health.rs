//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/health
///
/// Issues one count query so an unreachable store surfaces as a 500.
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.registry.count().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.config.database.backend.to_string(),
    }))
}
