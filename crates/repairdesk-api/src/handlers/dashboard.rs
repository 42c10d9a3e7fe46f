//! Dashboard handler.

use axum::Json;
use axum::extract::State;

use repairdesk_service::DashboardSnapshot;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<DashboardSnapshot>> {
    Ok(Json(state.dashboard.snapshot().await?))
}
