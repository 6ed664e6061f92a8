//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::client::MessageResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Department, DepartmentCreate, DepartmentUpdate};
use crate::db::repository::DepartmentRepository;
use crate::utils::{AppError, AppResult, ErrorCode, NotFoundAs, ValidatedJson};

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Department>>> {
    let depts = DepartmentRepository::new(state.get_db())
        .find_all(user.tenant())
        .await?;
    Ok(Json(depts))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Department>> {
    DepartmentRepository::new(state.get_db())
        .find_by_id(&id, user.tenant())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<DepartmentCreate>,
) -> AppResult<Json<Department>> {
    let dept = DepartmentRepository::new(state.get_db())
        .create(&Department::new(payload, user.tenant_id.clone()))
        .await?;
    tracing::info!(department_id = %dept.id, "Department created");
    Ok(Json(dept))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<DepartmentUpdate>,
) -> AppResult<Json<Department>> {
    let dept = DepartmentRepository::new(state.get_db())
        .update(&id, user.tenant(), &payload)
        .await
        .not_found_as(ErrorCode::DepartmentNotFound)?;
    Ok(Json(dept))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    DepartmentRepository::new(state.get_db())
        .delete(&id, user.tenant())
        .await
        .not_found_as(ErrorCode::DepartmentNotFound)?;
    tracing::info!(department_id = %id, "Department deleted");
    Ok(Json(MessageResponse::new("Department deleted")))
}
