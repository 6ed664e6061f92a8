//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::Role;
use shared::client::UserInfo;

use super::serde_helpers;

/// Login identity
///
/// Never serialized to API responses directly; use [`UserInfo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub must_change_password: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        password_hash: String,
        full_name: String,
        role: Role,
        tenant_id: Option<String>,
    ) -> Self {
        Self {
            id: String::new(),
            email,
            password_hash,
            full_name,
            role,
            tenant_id,
            is_active: true,
            must_change_password: false,
            created_at: Utc::now(),
        }
    }

    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            tenant_id: self.tenant_id.clone(),
            is_active: self.is_active,
            must_change_password: self.must_change_password,
        }
    }
}

/// Emails are compared case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_never_carries_hash() {
        let user = User::new(
            "a@b.com".into(),
            "$argon2id$secret".into(),
            "A B".into(),
            Role::Hr,
            None,
        );
        let json = serde_json::to_string(&user.info()).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"role\":\"hr\""));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane@Example.COM "), "jane@example.com");
    }
}
