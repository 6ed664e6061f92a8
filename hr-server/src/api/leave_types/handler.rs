//! Leave Type API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::client::MessageResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{LeaveType, LeaveTypeCreate, LeaveTypeUpdate};
use crate::db::repository::LeaveTypeRepository;
use crate::utils::{AppResult, ErrorCode, NotFoundAs, ValidatedJson};

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<LeaveType>>> {
    let types = LeaveTypeRepository::new(state.get_db())
        .find_all(user.tenant())
        .await?;
    Ok(Json(types))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<LeaveTypeCreate>,
) -> AppResult<Json<LeaveType>> {
    let leave_type = LeaveTypeRepository::new(state.get_db())
        .create(&LeaveType::new(payload, user.tenant_id.clone()))
        .await?;
    Ok(Json(leave_type))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<LeaveTypeUpdate>,
) -> AppResult<Json<LeaveType>> {
    let leave_type = LeaveTypeRepository::new(state.get_db())
        .update(&id, user.tenant(), &payload)
        .await
        .not_found_as(ErrorCode::LeaveTypeNotFound)?;
    Ok(Json(leave_type))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    LeaveTypeRepository::new(state.get_db())
        .delete(&id, user.tenant())
        .await
        .not_found_as(ErrorCode::LeaveTypeNotFound)?;
    Ok(Json(MessageResponse::new("Leave type deleted")))
}
