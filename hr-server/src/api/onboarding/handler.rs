//! Onboarding API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    BulkDepartments, BulkDepartmentsResult, BulkEmployees, BulkEmployeesResult, BulkLeaveTypes,
    BulkLeaveTypesResult, OnboardingFlag, OnboardingStatus,
};
use crate::services::OnboardingService;
use crate::utils::{AppResult, ValidatedJson};

/// GET /api/onboarding/status
pub async fn status(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<OnboardingStatus>> {
    let status = OnboardingService::new(state).status(&user).await?;
    Ok(Json(status))
}

/// POST /api/onboarding/departments
pub async fn departments(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<BulkDepartments>,
) -> AppResult<Json<BulkDepartmentsResult>> {
    let result = OnboardingService::new(state)
        .create_departments(&user, payload.departments)
        .await?;
    Ok(Json(result))
}

/// POST /api/onboarding/leave-types
pub async fn leave_types(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<BulkLeaveTypes>,
) -> AppResult<Json<BulkLeaveTypesResult>> {
    let result = OnboardingService::new(state)
        .create_leave_types(&user, payload.leave_types)
        .await?;
    Ok(Json(result))
}

/// POST /api/onboarding/employees
pub async fn employees(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<BulkEmployees>,
) -> AppResult<Json<BulkEmployeesResult>> {
    let result = OnboardingService::new(state)
        .invite_employees(&user, payload.employees)
        .await?;
    Ok(Json(result))
}

/// POST /api/onboarding/complete
pub async fn complete(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<OnboardingFlag>> {
    finish(state, user, false).await
}

/// POST /api/onboarding/skip
pub async fn skip(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<OnboardingFlag>> {
    finish(state, user, true).await
}

async fn finish(
    state: ServerState,
    user: CurrentUser,
    skipped: bool,
) -> AppResult<Json<OnboardingFlag>> {
    let (completed, skipped) = OnboardingService::new(state).finish(&user, skipped).await?;
    tracing::info!(user_id = %user.id, skipped, "Onboarding finished");
    Ok(Json(OnboardingFlag { completed, skipped }))
}
