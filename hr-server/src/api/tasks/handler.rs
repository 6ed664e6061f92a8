//! Task API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::client::MessageResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Task, TaskCreate, TaskQuery, TaskUpdate};
use crate::db::repository::{ProjectRepository, TaskRepository};
use crate::utils::{AppError, AppResult, ErrorCode, NotFoundAs, ValidatedJson};

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<TaskQuery>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = TaskRepository::new(state.get_db())
        .find_all(user.tenant(), &query)
        .await?;
    Ok(Json(tasks))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    TaskRepository::new(state.get_db())
        .find_by_id(&id, user.tenant())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::TaskNotFound))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<TaskCreate>,
) -> AppResult<Json<Task>> {
    ProjectRepository::new(state.get_db())
        .find_by_id(&payload.project_id, user.tenant())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProjectNotFound))?;

    let task = TaskRepository::new(state.get_db())
        .create(&Task::new(payload, user.tenant_id.clone()))
        .await?;
    tracing::info!(task_id = %task.id, project_id = %task.project_id, "Task created");
    Ok(Json(task))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<TaskUpdate>,
) -> AppResult<Json<Task>> {
    let task = TaskRepository::new(state.get_db())
        .update(&id, user.tenant(), &payload)
        .await
        .not_found_as(ErrorCode::TaskNotFound)?;
    Ok(Json(task))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    TaskRepository::new(state.get_db())
        .delete(&id, user.tenant())
        .await
        .not_found_as(ErrorCode::TaskNotFound)?;
    Ok(Json(MessageResponse::new("Task deleted")))
}
