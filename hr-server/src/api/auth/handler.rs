//! Auth API Handlers

use axum::{Json, extract::State};
use chrono::{Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use shared::Role;
use shared::client::{
    CurrentUserResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse,
};

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::models::{PasswordReset, PasswordResetConfirm, PasswordResetRequest, User, normalize_email};
use crate::db::repository::{PasswordResetRepository, RepoError, TenantRepository, UserRepository};
use crate::security_log;
use crate::services::notification::{NotificationService, password_reset_email};
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};

/// Reset links stay valid for one hour
const RESET_TOKEN_TTL_MINUTES: i64 = 60;

fn issue_token(state: &ServerState, user: &User) -> AppResult<String> {
    state
        .get_jwt_service()
        .generate_token(&user.id, &user.email)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))
}

fn hash_or_internal(password: &str) -> AppResult<String> {
    hash_password(password).map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// sha256 hex of a reset token; only the hash is stored
pub fn reset_token_hash(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn new_reset_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>> {
    let role = req.role.unwrap_or_default();
    if role == Role::SuperAdmin {
        security_log!("WARN", "register_super_admin", email = req.email.clone());
        return Err(AppError::with_message(
            ErrorCode::RoleNotAssignable,
            "super_admin cannot be registered",
        ));
    }

    if let Some(tenant_id) = req.tenant_id.as_deref() {
        TenantRepository::new(state.get_db())
            .find_by_id(tenant_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;
    }

    let users = UserRepository::new(state.get_db());
    let email = normalize_email(&req.email);
    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
    }

    let user = User::new(
        email,
        hash_or_internal(&req.password)?,
        req.full_name.trim().to_string(),
        role,
        req.tenant_id,
    );
    let user = match users.create(&user).await {
        Ok(user) => user,
        Err(RepoError::Duplicate(_)) => return Err(AppError::new(ErrorCode::EmailAlreadyRegistered)),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");
    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        token: issue_token(&state, &user)?,
        user: user.info(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepository::new(state.get_db())
        .find_by_email(&req.email)
        .await?;

    let user = match user {
        Some(user) if verify_password(&req.password, &user.password_hash).unwrap_or(false) => user,
        _ => {
            security_log!("WARN", "login_failed", email = normalize_email(&req.email));
            return Err(AppError::invalid_credentials());
        }
    };

    if !user.is_active {
        security_log!("WARN", "login_disabled_account", user_id = user.id.clone());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse {
        token: issue_token(&state, &user)?,
        user: user.info(),
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<CurrentUserResponse>> {
    let user = UserRepository::new(state.get_db())
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(CurrentUserResponse { user: user.info() }))
}

/// POST /api/auth/password-reset/request
///
/// Same answer whether or not the email exists.
pub async fn request_password_reset(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<PasswordResetRequest>,
) -> AppResult<Json<MessageResponse>> {
    let ack = MessageResponse::new("If the email is registered, a reset link has been sent");

    let Some(user) = UserRepository::new(state.get_db())
        .find_by_email(&req.email)
        .await?
    else {
        return Ok(Json(ack));
    };

    let token = new_reset_token();
    let now = Utc::now();
    PasswordResetRepository::new(state.get_db())
        .create(&PasswordReset {
            id: String::new(),
            user_id: user.id.clone(),
            token_hash: reset_token_hash(&token),
            expires_at: now + Duration::minutes(RESET_TOKEN_TTL_MINUTES),
            used: false,
            created_at: now,
        })
        .await?;

    let notifications = NotificationService::new(state.clone());
    let tenant = user.tenant_id.as_deref();
    if notifications.settings(tenant).await?.is_some() {
        let message = password_reset_email(&user.email, &user.full_name, &notifications.reset_url(&token));
        notifications.enqueue(tenant, message).await?;
    } else {
        tracing::warn!(user_id = %user.id, "Password reset requested but email is not configured");
    }

    Ok(Json(ack))
}

/// POST /api/auth/password-reset/confirm
pub async fn confirm_password_reset(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<PasswordResetConfirm>,
) -> AppResult<Json<MessageResponse>> {
    let reset = PasswordResetRepository::new(state.get_db())
        .consume(&reset_token_hash(&req.token))
        .await?
        .filter(|r| r.expires_at > Utc::now())
        .ok_or_else(|| {
            security_log!("WARN", "password_reset_rejected", reason = "invalid_or_expired");
            AppError::new(ErrorCode::ResetTokenInvalid)
        })?;

    UserRepository::new(state.get_db())
        .set_password(&reset.user_id, hash_or_internal(&req.new_password)?)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ResetTokenInvalid))?;

    tracing::info!(user_id = %reset.user_id, "Password reset completed");
    Ok(Json(MessageResponse::new("Password has been reset")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_token_hash_is_sha256_hex() {
        let hash = reset_token_hash("abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_reset_tokens_are_unique() {
        let a = new_reset_token();
        let b = new_reset_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
