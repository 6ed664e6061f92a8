//! Password Reset Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::models::PasswordReset;
use crate::db::schema::tables::PASSWORD_RESET;

#[derive(Clone)]
pub struct PasswordResetRepository {
    base: BaseRepository,
}

impl PasswordResetRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, reset: &PasswordReset) -> RepoResult<PasswordReset> {
        self.base.create(PASSWORD_RESET, reset).await
    }

    /// Mark the token used and return it as it was before
    ///
    /// Only one caller can ever get `Some` for a given hash.
    pub async fn consume(&self, token_hash: &str) -> RepoResult<Option<PasswordReset>> {
        let rows: Vec<PasswordReset> = self
            .base
            .db()
            .query(
                "UPDATE password_reset SET used = true \
                 WHERE token_hash = $hash AND used = false RETURN BEFORE",
            )
            .bind(("hash", token_hash.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }
}
