//! Client API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::client::MessageResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Client, ClientCreate, ClientUpdate};
use crate::db::repository::ClientRepository;
use crate::utils::{AppError, AppResult, ErrorCode, NotFoundAs, ValidatedJson};

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Client>>> {
    let clients = ClientRepository::new(state.get_db())
        .find_all(user.tenant())
        .await?;
    Ok(Json(clients))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Client>> {
    ClientRepository::new(state.get_db())
        .find_by_id(&id, user.tenant())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<ClientCreate>,
) -> AppResult<Json<Client>> {
    let client = ClientRepository::new(state.get_db())
        .create(&Client::new(payload, user.tenant_id.clone()))
        .await?;
    tracing::info!(client_id = %client.id, code = %client.code, "Client created");
    Ok(Json(client))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ClientUpdate>,
) -> AppResult<Json<Client>> {
    let client = ClientRepository::new(state.get_db())
        .update(&id, user.tenant(), &payload)
        .await
        .not_found_as(ErrorCode::ClientNotFound)?;
    Ok(Json(client))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    ClientRepository::new(state.get_db())
        .delete(&id, user.tenant())
        .await
        .not_found_as(ErrorCode::ClientNotFound)?;
    tracing::info!(client_id = %id, "Client deleted");
    Ok(Json(MessageResponse::new("Client deleted")))
}
