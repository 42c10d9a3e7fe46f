//! Staff account handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use repairdesk_core::types::UserId;
use repairdesk_entity::user::User;

use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, parse_id, parse_role};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.directory.list_users().await?))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<User>> {
    let id: UserId = parse_id(&raw_id)?;
    Ok(Json(state.directory.get_user(id).await?))
}

/// GET /api/users/role/{role}
pub async fn list_by_role(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> ApiResult<Json<Vec<User>>> {
    let role = parse_role(&role)?;
    Ok(Json(state.directory.list_by_role(role).await?))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.directory.create_user(req.into_profile()?).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    let id: UserId = parse_id(&raw_id)?;
    Ok(Json(state.directory.update_user(id, req.into()).await?))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: UserId = parse_id(&raw_id)?;
    state.directory.delete_user(id).await?;
    Ok(Json(MessageResponse::new("Utilisateur supprimé avec succès")))
}
