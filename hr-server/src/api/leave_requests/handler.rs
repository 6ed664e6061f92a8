//! Leave Request API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use shared::client::MessageResponse;

use crate::auth::{Capability, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{LeaveRequest, LeaveRequestCreate, LeaveRequestQuery, LeaveStatus};
use crate::db::repository::{
    EmployeeRepository, Filter, LeaveRequestRepository, LeaveTypeRepository,
};
use crate::utils::time::parse_date;
use crate::utils::{AppError, AppResult, ErrorCode, NotFoundAs, ValidatedJson};

/// POST /api/leave-requests
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<LeaveRequestCreate>,
) -> AppResult<Json<LeaveRequest>> {
    let start = parse_date(&payload.start_date)?;
    let end = parse_date(&payload.end_date)?;
    if end < start {
        return Err(AppError::with_message(
            ErrorCode::InvalidDateRange,
            "end_date must not be before start_date",
        ));
    }

    LeaveTypeRepository::new(state.get_db())
        .find_by_id(&payload.leave_type_id, user.tenant())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::LeaveTypeNotFound))?;

    let employee = EmployeeRepository::new(state.get_db())
        .find_by_email(&user.email, user.tenant())
        .await?;

    let request = LeaveRequest {
        id: String::new(),
        employee_id: employee.map(|e| e.id),
        user_id: user.id.clone(),
        leave_type_id: payload.leave_type_id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        reason: payload.reason,
        half_day: payload.half_day,
        status: LeaveStatus::Pending,
        tenant_id: user.tenant_id.clone(),
        approved_by: None,
        approved_at: None,
        rejected_by: None,
        rejected_at: None,
        created_at: Utc::now(),
    };
    let request = LeaveRequestRepository::new(state.get_db())
        .create(&request)
        .await?;
    tracing::info!(leave_request_id = %request.id, user_id = %user.id, "Leave requested");
    Ok(Json(request))
}

/// GET /api/leave-requests
///
/// Without `ViewTeamData` the caller only sees their own requests.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<LeaveRequestQuery>,
) -> AppResult<Json<Vec<LeaveRequest>>> {
    let mut filter = Filter::new()
        .tenant(user.tenant())
        .eq_opt("status", query.status.map(|s| s.as_str()))
        .eq_opt("employee_id", query.employee_id);
    if !user.can(Capability::ViewTeamData) {
        filter = filter.eq("user_id", user.id.clone());
    }
    let requests = LeaveRequestRepository::new(state.get_db())
        .find_all(filter)
        .await?;
    Ok(Json(requests))
}

async fn decide(
    state: ServerState,
    user: CurrentUser,
    id: String,
    status: LeaveStatus,
) -> AppResult<Json<MessageResponse>> {
    LeaveRequestRepository::new(state.get_db())
        .decide(&id, user.tenant(), status, &user.id)
        .await
        .not_found_as(ErrorCode::LeaveRequestNotFound)?;
    tracing::info!(leave_request_id = %id, decided_by = %user.id, status = status.as_str(), "Leave decided");
    let message = match status {
        LeaveStatus::Approved => "Leave approved",
        _ => "Leave rejected",
    };
    Ok(Json(MessageResponse::new(message)))
}

/// PUT /api/leave-requests/{id}/approve
pub async fn approve(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    decide(state, user, id, LeaveStatus::Approved).await
}

/// PUT /api/leave-requests/{id}/reject
pub async fn reject(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    decide(state, user, id, LeaveStatus::Rejected).await
}
