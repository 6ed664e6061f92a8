//! Current user context
//!
//! `require_auth` resolves the bearer token to a stored user and puts a
//! [`CurrentUser`] into the request extensions; handlers take it as an
//! extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;
use shared::Role;

use crate::auth::policy::Capability;
use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::in_scope;
use crate::utils::AppError;

/// Authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub tenant_id: Option<String>,
    pub is_active: bool,
    pub must_change_password: bool,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            tenant_id: user.tenant_id.clone(),
            is_active: user.is_active,
            must_change_password: user.must_change_password,
        }
    }
}

impl CurrentUser {
    /// Tenant scope for queries; `None` for platform users
    pub fn tenant(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub fn can(&self, capability: Capability) -> bool {
        capability.allows(self.role)
    }

    pub fn can_access_tenant(&self, tenant_id: Option<&str>) -> bool {
        in_scope(tenant_id, self.tenant())
    }
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(AppError::unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, tenant: Option<&str>) -> CurrentUser {
        CurrentUser {
            id: "u1".into(),
            email: "u1@example.com".into(),
            full_name: "U One".into(),
            role,
            tenant_id: tenant.map(str::to_string),
            is_active: true,
            must_change_password: false,
        }
    }

    #[test]
    fn test_platform_user_sees_every_tenant() {
        let root = user(Role::SuperAdmin, None);
        assert!(root.can_access_tenant(Some("t1")));
        assert!(root.can_access_tenant(None));
    }

    #[test]
    fn test_tenant_user_is_confined() {
        let hr = user(Role::Hr, Some("t1"));
        assert!(hr.can_access_tenant(Some("t1")));
        assert!(!hr.can_access_tenant(Some("t2")));
        assert!(hr.can(Capability::ManageOrganization));
        assert!(!hr.can(Capability::ManageTenants));
    }
}
