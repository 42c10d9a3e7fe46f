//! Sign-in handler.

use axum::Json;
use axum::extract::State;
use tracing::info;

use crate::dto::request::LoginRequest;
use crate::dto::response::LoginResponse;
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/auth/login
///
/// Unknown email, wrong password, and inactive account all answer the same
/// `AUTHENTICATION` error.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state
        .directory
        .verify_credentials(&req.email, &req.password)
        .await?;
    info!(user_id = %user.id, role = %user.role, "User signed in");
    Ok(Json(LoginResponse::from(user)))
}
