//! Me API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use shared::client::{ChangePasswordRequest, MessageResponse, UserInfo};

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::models::Employee;
use crate::db::repository::{EmployeeRepository, UserRepository};
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserInfo,
    /// Employee record with the same email in the caller's tenant
    pub employee: Option<Employee>,
}

/// GET /api/me/profile
pub async fn profile(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserRepository::new(state.get_db())
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    let employee = EmployeeRepository::new(state.get_db())
        .find_by_email(&user.email, current.tenant())
        .await?;
    Ok(Json(ProfileResponse {
        user: user.info(),
        employee,
    }))
}

/// PUT /api/me/password
pub async fn change_password(
    State(state): State<ServerState>,
    current: CurrentUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let users = UserRepository::new(state.get_db());
    let user = users
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    if !verify_password(&req.current_password, &user.password_hash).unwrap_or(false) {
        security_log!("WARN", "password_change_rejected", user_id = user.id.clone());
        return Err(AppError::invalid_credentials());
    }

    let hash = hash_password(&req.new_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    users.set_password(&user.id, hash).await?;

    tracing::info!(user_id = %user.id, "Password changed");
    Ok(Json(MessageResponse::new("Password updated")))
}
