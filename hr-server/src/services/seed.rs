//! Bootstrap data
//!
//! A fresh database gets one platform `super_admin` so the first tenant can
//! be created.

use shared::Role;

use crate::auth::{generate_temporary_password, hash_password};
use crate::core::ServerState;
use crate::db::models::{User, normalize_email};
use crate::db::repository::{RepoError, UserRepository};
use crate::utils::{AppError, AppResult};

pub async fn ensure_super_admin(state: &ServerState) -> AppResult<()> {
    let users = UserRepository::new(state.get_db());
    if users.count_with_role(Role::SuperAdmin).await? > 0 {
        return Ok(());
    }

    let email = normalize_email(&state.config.seed_admin_email);
    let (password, generated) = match &state.config.seed_admin_password {
        Some(p) if !p.is_empty() => (p.clone(), false),
        _ => (generate_temporary_password(16), true),
    };
    let hash = hash_password(&password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let mut admin = User::new(
        email.clone(),
        hash,
        "Platform Administrator".to_string(),
        Role::SuperAdmin,
        None,
    );
    admin.must_change_password = generated;

    match users.create(&admin).await {
        Ok(_) => {}
        // Someone registered this email first; leave their account alone
        Err(RepoError::Duplicate(_)) => {
            tracing::warn!(email = %email, "Seed admin email is taken, super admin not created");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    if generated {
        tracing::warn!(
            email = %email,
            password = %password,
            "Created super admin with a generated password; change it after first login"
        );
    } else {
        tracing::info!(email = %email, "Created super admin");
    }
    Ok(())
}
