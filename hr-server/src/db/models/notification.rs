//! Mail settings, outbox and password reset models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;

/// Record key used for settings that belong to no tenant
pub const PLATFORM_SETTINGS_KEY: &str = "platform";

/// Mail relay settings, one record per tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSettings {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Settings as shown to admins; the password never leaves the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSettingsView {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub from_email: String,
    pub from_name: String,
    pub has_password: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&EmailSettings> for EmailSettingsView {
    fn from(s: &EmailSettings) -> Self {
        Self {
            smtp_host: s.smtp_host.clone(),
            smtp_port: s.smtp_port,
            smtp_username: s.smtp_username.clone(),
            from_email: s.from_email.clone(),
            from_name: s.from_name.clone(),
            has_password: !s.smtp_password.is_empty(),
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmailSettingsUpdate {
    #[validate(length(min = 1, max = 253))]
    pub smtp_host: String,
    #[validate(range(min = 1))]
    pub smtp_port: u16,
    #[validate(length(min = 1))]
    pub smtp_username: String,
    /// Omit to keep the stored password
    pub smtp_password: Option<String>,
    #[validate(email)]
    pub from_email: String,
    #[validate(length(min = 1, max = 200))]
    pub from_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TestEmailRequest {
    #[validate(email)]
    pub to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutboxStatus {
    Pending,
    Sent,
    Failed,
}

/// Email waiting for (or done with) delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEmail {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: OutboxStatus,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
}

/// Single-use password reset token (stored as a sha256 hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordReset {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordResetConfirm {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 6, max = 128))]
    pub new_password: String,
}
