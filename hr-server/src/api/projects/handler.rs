//! Project API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::client::MessageResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Project, ProjectCreate, ProjectDetail, ProjectQuery, ProjectUpdate};
use crate::db::repository::{ClientRepository, ProjectRepository, TimesheetRepository};
use crate::utils::time::round_to;
use crate::utils::{AppError, AppResult, ErrorCode, NotFoundAs, ValidatedJson};

/// GET /api/projects?client_id&active
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ProjectQuery>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepository::new(state.get_db())
        .find_all(user.tenant(), &query)
        .await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
///
/// Hours are rolled up over every entry of the project whatever its status.
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ProjectDetail>> {
    let project = ProjectRepository::new(state.get_db())
        .find_by_id(&id, user.tenant())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProjectNotFound))?;
    let (logged, billable) = TimesheetRepository::new(state.get_db())
        .project_hours(&project.id)
        .await?;
    Ok(Json(ProjectDetail {
        project,
        logged_hours: round_to(logged, 2),
        billable_hours: round_to(billable, 2),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<ProjectCreate>,
) -> AppResult<Json<Project>> {
    ClientRepository::new(state.get_db())
        .find_by_id(&payload.client_id, user.tenant())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound))?;

    let project = ProjectRepository::new(state.get_db())
        .create(&Project::new(payload, user.tenant_id.clone()))
        .await?;
    tracing::info!(project_id = %project.id, client_id = %project.client_id, "Project created");
    Ok(Json(project))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ProjectUpdate>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepository::new(state.get_db())
        .update(&id, user.tenant(), &payload)
        .await
        .not_found_as(ErrorCode::ProjectNotFound)?;
    Ok(Json(project))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    ProjectRepository::new(state.get_db())
        .delete(&id, user.tenant())
        .await
        .not_found_as(ErrorCode::ProjectNotFound)?;
    tracing::info!(project_id = %id, "Project deleted");
    Ok(Json(MessageResponse::new("Project deleted")))
}
