//! Repair job handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use repairdesk_core::types::{ClientId, MachineId, UserId};
use repairdesk_entity::machine::MachineDetails;

use crate::dto::request::{KeywordQuery, MachineRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, parse_id, parse_status};
use crate::state::AppState;

/// GET /api/machines
pub async fn list_machines(State(state): State<AppState>) -> ApiResult<Json<Vec<MachineDetails>>> {
    Ok(Json(state.workflow.list_machines().await?))
}

/// GET /api/machines/{id}
pub async fn get_machine(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MachineDetails>> {
    let id: MachineId = parse_id(&raw_id)?;
    Ok(Json(state.workflow.get_machine(id).await?))
}

/// GET /api/machines/statut/{statut}
pub async fn list_by_status(
    State(state): State<AppState>,
    Path(statut): Path<String>,
) -> ApiResult<Json<Vec<MachineDetails>>> {
    let status = parse_status(&statut)?;
    Ok(Json(state.workflow.list_by_status(status).await?))
}

/// GET /api/machines/client/{id}
pub async fn list_by_client(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Vec<MachineDetails>>> {
    let id: ClientId = parse_id(&raw_id)?;
    Ok(Json(state.workflow.list_by_client(id).await?))
}

/// GET /api/machines/secretaire/{id}
pub async fn list_by_secretary(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Vec<MachineDetails>>> {
    let id: UserId = parse_id(&raw_id)?;
    Ok(Json(state.workflow.list_by_secretary(id).await?))
}

/// GET /api/machines/technicien/{id}
pub async fn list_by_technician(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Vec<MachineDetails>>> {
    let id: UserId = parse_id(&raw_id)?;
    Ok(Json(state.workflow.list_by_technician(id).await?))
}

/// GET /api/machines/search?keyword=
pub async fn search_machines(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Json<Vec<MachineDetails>>> {
    Ok(Json(state.search.search_machines(&query.keyword).await?))
}

/// POST /api/machines
pub async fn create_machine(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<MachineRequest>,
) -> ApiResult<(StatusCode, Json<MachineDetails>)> {
    let details = state.workflow.create_machine(req.into_intake()?).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

/// PUT /api/machines/{id}
pub async fn update_machine(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(req): ValidatedJson<MachineRequest>,
) -> ApiResult<Json<MachineDetails>> {
    let id: MachineId = parse_id(&raw_id)?;
    Ok(Json(state.workflow.update_machine(id, req.into_changes()?).await?))
}

/// DELETE /api/machines/{id}
pub async fn delete_machine(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: MachineId = parse_id(&raw_id)?;
    state.workflow.delete_machine(id).await?;
    Ok(Json(MessageResponse::new("Machine supprimée avec succès")))
}
