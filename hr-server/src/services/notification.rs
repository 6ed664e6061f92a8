//! Notification dispatcher
//!
//! Builds the outgoing emails and hands them to the outbox or straight to
//! the mailer. Delivery problems are logged, never raised.

use chrono::Utc;

use crate::core::ServerState;
use crate::db::models::{EmailSettings, OutboxEmail, OutboxStatus};
use crate::db::repository::{EmailSettingsRepository, OutboxRepository, RepoResult};
use crate::services::mailer::EmailMessage;

pub struct NotificationService {
    state: ServerState,
}

impl NotificationService {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Mail settings of a tenant (platform settings when `None`)
    pub async fn settings(&self, tenant: Option<&str>) -> RepoResult<Option<EmailSettings>> {
        EmailSettingsRepository::new(self.state.get_db())
            .find(tenant)
            .await
    }

    /// Send now; `false` when the relay refused or failed
    pub async fn deliver(&self, settings: &EmailSettings, message: &EmailMessage) -> bool {
        match self.state.mailer.send(settings, message).await {
            Ok(()) => {
                tracing::info!(to = %message.to, subject = %message.subject, "Email sent");
                true
            }
            Err(e) => {
                tracing::warn!(to = %message.to, error = %e, "Email delivery failed");
                false
            }
        }
    }

    /// Persist a message for the outbox worker and wake it
    pub async fn enqueue(&self, tenant: Option<&str>, message: EmailMessage) -> RepoResult<OutboxEmail> {
        let row = OutboxEmail {
            id: String::new(),
            tenant_id: tenant.map(str::to_string),
            recipient: message.to,
            subject: message.subject,
            body: message.body,
            status: OutboxStatus::Pending,
            attempts: 0,
            last_error: None,
            created_at: Utc::now(),
            sent_at: None,
        };
        let queued = OutboxRepository::new(self.state.get_db()).enqueue(&row).await?;
        self.state.notify_outbox();
        Ok(queued)
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.state.config.frontend_url.trim_end_matches('/'))
    }

    pub fn reset_url(&self, token: &str) -> String {
        format!(
            "{}/reset-password?token={}",
            self.state.config.frontend_url.trim_end_matches('/'),
            token
        )
    }
}

// =============================================================================
// Templates
// =============================================================================

pub fn welcome_email(to: &str, full_name: &str, temporary_password: &str, login_url: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Welcome to the HR portal".to_string(),
        body: format!(
            "Hello {full_name},\n\n\
             An account has been created for you.\n\n\
             Email: {to}\n\
             Temporary password: {temporary_password}\n\n\
             Sign in at {login_url} and choose a new password.\n"
        ),
    }
}

pub fn password_reset_email(to: &str, full_name: &str, reset_url: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Reset your password".to_string(),
        body: format!(
            "Hello {full_name},\n\n\
             Use the link below to set a new password. It expires in one hour.\n\n\
             {reset_url}\n\n\
             If you did not ask for this, ignore this email.\n"
        ),
    }
}

pub fn test_email(to: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Test email".to_string(),
        body: "Your mail settings work.\n".to_string(),
    }
}
