//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::client::MessageResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, EmployeeQuery, EmployeeUpdate};
use crate::db::repository::{EmployeeRepository, RepoError};
use crate::utils::{AppError, AppResult, ErrorCode, NotFoundAs, ValidatedJson};

/// Duplicate (tenant, code) or (tenant, email)
fn duplicate_as_exists(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::with_message(
            ErrorCode::EmployeeAlreadyExists,
            "Employee code or email already exists",
        ),
        RepoError::NotFound(_) => AppError::new(ErrorCode::EmployeeNotFound),
        other => other.into(),
    }
}

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let employees = EmployeeRepository::new(state.get_db())
        .find_all(user.tenant(), &query)
        .await?;
    Ok(Json(employees))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    EmployeeRepository::new(state.get_db())
        .find_by_id(&id, user.tenant())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    let employee = Employee::new(payload, user.tenant_id.clone(), Some(user.id.clone()));
    let employee = EmployeeRepository::new(state.get_db())
        .create(&employee)
        .await
        .map_err(duplicate_as_exists)?;
    tracing::info!(employee_id = %employee.id, code = %employee.employee_id, "Employee created");
    Ok(Json(employee))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    let employee = EmployeeRepository::new(state.get_db())
        .update(&id, user.tenant(), &payload)
        .await
        .map_err(duplicate_as_exists)?;
    Ok(Json(employee))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    EmployeeRepository::new(state.get_db())
        .delete(&id, user.tenant())
        .await
        .not_found_as(ErrorCode::EmployeeNotFound)?;
    tracing::info!(employee_id = %id, "Employee deleted");
    Ok(Json(MessageResponse::new("Employee deleted")))
}
