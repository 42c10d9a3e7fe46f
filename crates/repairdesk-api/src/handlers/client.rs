//! Client handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use repairdesk_core::types::ClientId;
use repairdesk_entity::client::Client;

use crate::dto::request::{ClientRequest, KeywordQuery};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/clients
pub async fn list_clients(State(state): State<AppState>) -> ApiResult<Json<Vec<Client>>> {
    Ok(Json(state.registry.list_clients().await?))
}

/// GET /api/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Client>> {
    let id: ClientId = parse_id(&raw_id)?;
    Ok(Json(state.registry.get_client(id).await?))
}

/// GET /api/clients/search?keyword=
pub async fn search_clients(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Json<Vec<Client>>> {
    Ok(Json(state.search.search_clients(&query.keyword).await?))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ClientRequest>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    let client = state.registry.create_client(req.into()).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// PUT /api/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(req): ValidatedJson<ClientRequest>,
) -> ApiResult<Json<Client>> {
    let id: ClientId = parse_id(&raw_id)?;
    Ok(Json(state.registry.update_client(id, req.into()).await?))
}

/// DELETE /api/clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: ClientId = parse_id(&raw_id)?;
    state.registry.delete_client(id).await?;
    Ok(Json(MessageResponse::new("Client supprimé avec succès")))
}
