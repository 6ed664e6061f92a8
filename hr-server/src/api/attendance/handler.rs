//! Attendance API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;

use crate::auth::{Capability, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{AttendanceMark, AttendanceQuery, AttendanceRecord, ClockResponse};
use crate::db::repository::{AttendanceRepository, Filter, RepoError, UserRepository};
use crate::utils::time::{parse_date, today as today_utc};
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};

/// POST /api/attendance/clock-in
pub async fn clock_in(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ClockResponse>> {
    let now = Utc::now();
    let date = today_utc();
    match AttendanceRepository::new(state.get_db())
        .clock_in(&user.id, user.tenant(), &date, now)
        .await
    {
        Ok(_) => {}
        Err(RepoError::Duplicate(_)) => return Err(AppError::new(ErrorCode::AlreadyClockedIn)),
        Err(e) => return Err(e.into()),
    }
    tracing::info!(user_id = %user.id, date = %date, "Clocked in");
    Ok(Json(ClockResponse {
        message: "Clocked in successfully".to_string(),
        time: now,
    }))
}

/// POST /api/attendance/clock-out
pub async fn clock_out(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ClockResponse>> {
    let now = Utc::now();
    let date = today_utc();
    let repo = AttendanceRepository::new(state.get_db());

    if repo.clock_out(&user.id, &date, now).await?.is_none() {
        let day = repo.find_for_day(&user.id, &date).await?;
        return Err(match day {
            Some(record) if record.check_in.is_some() => AppError::new(ErrorCode::AlreadyClockedOut),
            _ => AppError::new(ErrorCode::NotClockedIn),
        });
    }

    tracing::info!(user_id = %user.id, date = %date, "Clocked out");
    Ok(Json(ClockResponse {
        message: "Clocked out successfully".to_string(),
        time: now,
    }))
}

/// GET /api/attendance
///
/// Inclusive date range, newest first. Without `ViewTeamData` the caller
/// only sees their own days.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<Json<Vec<AttendanceRecord>>> {
    for date in [&query.start_date, &query.end_date].into_iter().flatten() {
        parse_date(date)?;
    }
    let subject = if user.can(Capability::ViewTeamData) {
        query.user_id.clone()
    } else {
        Some(user.id.clone())
    };
    let filter = Filter::new()
        .tenant(user.tenant())
        .eq_opt("user_id", subject)
        .date_range("date", query.start_date.as_deref(), query.end_date.as_deref());
    let records = AttendanceRepository::new(state.get_db())
        .find_all(filter)
        .await?;
    Ok(Json(records))
}

/// GET /api/attendance/today
pub async fn today(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Option<AttendanceRecord>>> {
    let record = AttendanceRepository::new(state.get_db())
        .find_for_day(&user.id, &today_utc())
        .await?;
    Ok(Json(record))
}

/// POST /api/attendance
pub async fn mark(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<AttendanceMark>,
) -> AppResult<Json<AttendanceRecord>> {
    parse_date(&payload.date)?;
    if let (Some(check_in), Some(check_out)) = (payload.check_in, payload.check_out) {
        if check_out < check_in {
            return Err(AppError::invalid("check_out must not be before check_in"));
        }
    }

    let subject = UserRepository::new(state.get_db())
        .find_by_id(&payload.user_id)
        .await?
        .filter(|u| user.can_access_tenant(u.tenant_id.as_deref()))
        .ok_or_else(|| AppError::not_found("User"))?;

    let record = AttendanceRecord {
        id: String::new(),
        user_id: subject.id.clone(),
        tenant_id: subject.tenant_id.clone(),
        date: payload.date,
        check_in: payload.check_in,
        check_out: payload.check_out,
        status: payload.status,
        created_at: Utc::now(),
    };
    let record = AttendanceRepository::new(state.get_db())
        .upsert_day(&record)
        .await?;
    tracing::info!(user_id = %record.user_id, date = %record.date, marked_by = %user.id, "Attendance marked");
    Ok(Json(record))
}
