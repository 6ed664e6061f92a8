//! Timesheet API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use shared::client::MessageResponse;

use crate::auth::{Capability, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{
    DecisionResult, EntryCreate, EntryPatch, EntryQuery, EntryStatus, EntryUpdate, PendingWeek,
    Project, SubmitResult, SummaryQuery, TimesheetEntry, WeekDecision, WeekRequest, WeeklySummary,
};
use crate::db::repository::{Filter, ProjectRepository, TaskRepository, TimesheetRepository};
use crate::services::timesheet::{check_hours, normalize_week, pending_weeks, weekly_summary};
use crate::utils::time::{parse_date, today, week_monday};
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};

/// Whose entries the caller may read; other users need `ViewTeamData`
fn subject_of(user: &CurrentUser, requested: Option<String>) -> AppResult<String> {
    match requested {
        Some(id) if id != user.id => {
            if user.can(Capability::ViewTeamData) {
                Ok(id)
            } else {
                Err(AppError::forbidden(
                    "Viewing other users' timesheets is not allowed",
                ))
            }
        }
        _ => Ok(user.id.clone()),
    }
}

/// Project of the caller's tenant, plus the task check when one is given
async fn resolve_project(
    state: &ServerState,
    user: &CurrentUser,
    project_id: &str,
    task_id: Option<&str>,
) -> AppResult<Project> {
    let project = ProjectRepository::new(state.get_db())
        .find_by_id(project_id, user.tenant())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProjectNotFound))?;

    if let Some(task_id) = task_id {
        let task = TaskRepository::new(state.get_db())
            .find_by_id(task_id, user.tenant())
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::TaskNotFound))?;
        if task.project_id != project.id {
            return Err(AppError::invalid("Task does not belong to the project"));
        }
    }
    Ok(project)
}

/// Explain why an owner-guarded write touched nothing
async fn refused(state: &ServerState, user: &CurrentUser, id: &str) -> AppError {
    let existing = TimesheetRepository::new(state.get_db())
        .find_by_id(id, user.tenant())
        .await;
    match existing {
        Ok(Some(entry)) if entry.user_id != user.id => {
            AppError::forbidden("Only the author can change a time entry")
        }
        Ok(Some(_)) => AppError::new(ErrorCode::TimeEntryLocked),
        Ok(None) => AppError::new(ErrorCode::TimeEntryNotFound),
        Err(e) => e.into(),
    }
}

/// GET /api/timesheets/entries?week_start|start_date&end_date&user_id
pub async fn list_entries(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<Vec<TimesheetEntry>>> {
    let subject = subject_of(&user, query.user_id)?;
    let (start, end) = match query.week_start {
        Some(day) => {
            let (start, end) = normalize_week(&day)?;
            (Some(start), Some(end))
        }
        None => {
            for date in [&query.start_date, &query.end_date].into_iter().flatten() {
                parse_date(date)?;
            }
            (query.start_date, query.end_date)
        }
    };

    let filter = Filter::new()
        .tenant(user.tenant())
        .eq("user_id", subject)
        .date_range("date", start.as_deref(), end.as_deref());
    let entries = TimesheetRepository::new(state.get_db())
        .find_all(filter)
        .await?;
    Ok(Json(entries))
}

/// POST /api/timesheets/entries
pub async fn create_entry(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<EntryCreate>,
) -> AppResult<Json<TimesheetEntry>> {
    check_hours(payload.hours)?;
    parse_date(&payload.date)?;
    let project =
        resolve_project(&state, &user, &payload.project_id, payload.task_id.as_deref()).await?;

    let entry = TimesheetEntry {
        id: String::new(),
        user_id: user.id.clone(),
        tenant_id: user.tenant_id.clone(),
        project_id: project.id,
        task_id: payload.task_id,
        date: payload.date,
        hours: payload.hours,
        description: payload.description,
        is_billable: payload.is_billable.unwrap_or(project.is_billable),
        status: EntryStatus::Draft,
        submitted_at: None,
        decided_by: None,
        decided_at: None,
        created_at: Utc::now(),
        updated_at: None,
    };
    let entry = TimesheetRepository::new(state.get_db()).create(&entry).await?;
    tracing::debug!(entry_id = %entry.id, hours = entry.hours, "Time entry created");
    Ok(Json(entry))
}

/// PUT /api/timesheets/entries/{id}
///
/// Only the author may edit, and only while the entry is draft or
/// rejected. The edited entry is draft again.
pub async fn update_entry(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<EntryUpdate>,
) -> AppResult<Json<TimesheetEntry>> {
    let repo = TimesheetRepository::new(state.get_db());
    let current = repo
        .find_by_id(&id, user.tenant())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TimeEntryNotFound))?;
    if current.user_id != user.id {
        return Err(AppError::forbidden("Only the author can change a time entry"));
    }
    if !current.status.is_editable() {
        return Err(AppError::new(ErrorCode::TimeEntryLocked));
    }

    let project_changed = payload.project_id.is_some();
    let project_id = payload.project_id.unwrap_or(current.project_id);
    // A task from the old project does not carry over
    let task_id = match payload.task_id {
        Some(t) => Some(t),
        None if project_changed => None,
        None => current.task_id,
    };
    let hours = payload.hours.unwrap_or(current.hours);
    check_hours(hours)?;
    let date = payload.date.unwrap_or(current.date);
    parse_date(&date)?;
    let project = resolve_project(&state, &user, &project_id, task_id.as_deref()).await?;

    let patch = EntryPatch {
        project_id: project.id,
        task_id,
        date,
        hours,
        description: payload.description.or(current.description),
        is_billable: payload.is_billable.unwrap_or(current.is_billable),
        status: EntryStatus::Draft,
        updated_at: Utc::now(),
    };

    match repo.update_editable(&id, &user.id, &patch).await? {
        Some(entry) => Ok(Json(entry)),
        None => Err(refused(&state, &user, &id).await),
    }
}

/// DELETE /api/timesheets/entries/{id}
pub async fn delete_entry(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = TimesheetRepository::new(state.get_db());
    if repo.find_by_id(&id, user.tenant()).await?.is_none() {
        return Err(AppError::new(ErrorCode::TimeEntryNotFound));
    }
    match repo.delete_editable(&id, &user.id).await? {
        Some(_) => Ok(Json(MessageResponse::new("Time entry deleted"))),
        None => Err(refused(&state, &user, &id).await),
    }
}

/// POST /api/timesheets/submit
pub async fn submit(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<WeekRequest>,
) -> AppResult<Json<SubmitResult>> {
    let (week_start, week_end) = normalize_week(&payload.week_start)?;
    let updated = TimesheetRepository::new(state.get_db())
        .submit_week(&user.id, &week_start, &week_end, Utc::now())
        .await?;
    tracing::info!(user_id = %user.id, week_start = %week_start, updated, "Timesheet week submitted");
    Ok(Json(SubmitResult {
        week_start,
        week_end,
        updated,
    }))
}

/// POST /api/timesheets/approve
pub async fn approve(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<WeekDecision>,
) -> AppResult<Json<DecisionResult>> {
    decide(state, user, payload, EntryStatus::Approved).await
}

/// POST /api/timesheets/reject
pub async fn reject(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<WeekDecision>,
) -> AppResult<Json<DecisionResult>> {
    decide(state, user, payload, EntryStatus::Rejected).await
}

async fn decide(
    state: ServerState,
    user: CurrentUser,
    payload: WeekDecision,
    status: EntryStatus,
) -> AppResult<Json<DecisionResult>> {
    let (start, end) = normalize_week(&payload.week_start)?;
    let updated = TimesheetRepository::new(state.get_db())
        .decide_week(
            &payload.user_id,
            user.tenant(),
            &start,
            &end,
            status,
            &user.id,
            Utc::now(),
        )
        .await?;
    tracing::info!(
        user_id = %payload.user_id,
        week_start = %start,
        status = status.as_str(),
        decided_by = %user.id,
        updated,
        "Timesheet week decided"
    );
    Ok(Json(DecisionResult { updated }))
}

/// GET /api/timesheets/summary?week_start&user_id
///
/// Defaults to the caller's current week.
pub async fn summary(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<WeeklySummary>> {
    let subject = subject_of(&user, query.user_id)?;
    let day = query.week_start.unwrap_or_else(today);
    let monday = week_monday(parse_date(&day)?);
    let (start, end) = normalize_week(&day)?;

    let filter = Filter::new()
        .tenant(user.tenant())
        .eq("user_id", subject)
        .date_range("date", Some(start.as_str()), Some(end.as_str()));
    let entries = TimesheetRepository::new(state.get_db())
        .find_all(filter)
        .await?;
    Ok(Json(weekly_summary(monday, &entries)))
}

/// GET /api/timesheets/pending
pub async fn pending(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<PendingWeek>>> {
    let filter = Filter::new()
        .tenant(user.tenant())
        .eq("status", EntryStatus::Submitted.as_str());
    let entries = TimesheetRepository::new(state.get_db())
        .find_all(filter)
        .await?;
    Ok(Json(pending_weeks(&entries)))
}
