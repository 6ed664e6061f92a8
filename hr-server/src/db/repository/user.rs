//! User Repository

use serde_json::json;
use shared::Role;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoResult};
use crate::db::models::{User, normalize_email};
use crate::db::schema::tables::USER;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        self.base.find(USER, id).await
    }

    /// Lookup is case-insensitive
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let users: Vec<User> = self
            .base
            .select(USER, Filter::new().eq("email", normalize_email(email)), "LIMIT 1")
            .await?;
        Ok(users.into_iter().next())
    }

    /// Insert a user; a taken email surfaces as `RepoError::Duplicate`
    pub async fn create(&self, user: &User) -> RepoResult<User> {
        self.base.create(USER, user).await
    }

    /// Replace the password hash and clear the forced-change flag
    pub async fn set_password(&self, id: &str, password_hash: String) -> RepoResult<Option<User>> {
        self.base
            .merge(
                USER,
                id,
                &json!({
                    "password_hash": password_hash,
                    "must_change_password": false,
                }),
            )
            .await
    }

    pub async fn count_with_role(&self, role: Role) -> RepoResult<i64> {
        self.base
            .count(USER, Filter::new().eq("role", role.as_str()))
            .await
    }
}
