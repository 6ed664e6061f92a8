//! Settings API Handlers

use axum::{Json, extract::State};
use chrono::Utc;

use shared::client::MessageResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{EmailSettings, EmailSettingsUpdate, EmailSettingsView, TestEmailRequest};
use crate::db::repository::EmailSettingsRepository;
use crate::services::NotificationService;
use crate::services::notification::test_email as test_message;
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};

/// GET /api/settings/email
pub async fn get_email(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Option<EmailSettingsView>>> {
    let settings = EmailSettingsRepository::new(state.get_db())
        .find(user.tenant())
        .await?;
    Ok(Json(settings.as_ref().map(EmailSettingsView::from)))
}

/// PUT /api/settings/email
pub async fn update_email(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<EmailSettingsUpdate>,
) -> AppResult<Json<EmailSettingsView>> {
    let repo = EmailSettingsRepository::new(state.get_db());
    let smtp_password = match payload.smtp_password {
        Some(p) => p,
        None => repo
            .find(user.tenant())
            .await?
            .map(|s| s.smtp_password)
            .unwrap_or_default(),
    };

    let settings = EmailSettings {
        id: String::new(),
        smtp_host: payload.smtp_host.trim().to_string(),
        smtp_port: payload.smtp_port,
        smtp_username: payload.smtp_username,
        smtp_password,
        from_email: payload.from_email,
        from_name: payload.from_name,
        updated_at: Some(Utc::now()),
    };
    let saved = repo.save(user.tenant(), &settings).await?;
    tracing::info!(
        tenant_id = user.tenant().unwrap_or("platform"),
        smtp_host = %saved.smtp_host,
        "Email settings saved"
    );
    Ok(Json(EmailSettingsView::from(&saved)))
}

/// POST /api/settings/email/test
///
/// Sends synchronously so the admin sees relay errors right away.
pub async fn test_email(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<TestEmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    let notifications = NotificationService::new(state);
    let settings = notifications
        .settings(user.tenant())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmailNotConfigured))?;

    if !notifications.deliver(&settings, &test_message(&payload.to)).await {
        return Err(AppError::new(ErrorCode::EmailDeliveryFailed));
    }
    Ok(Json(MessageResponse::new(format!(
        "Test email sent to {}",
        payload.to
    ))))
}
