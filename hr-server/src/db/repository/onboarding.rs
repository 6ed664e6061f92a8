//! Onboarding Repository

use chrono::Utc;
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::models::OnboardingState;
use crate::db::schema::tables::ONBOARDING;

#[derive(Clone)]
pub struct OnboardingRepository {
    base: BaseRepository,
}

impl OnboardingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// State record keyed by the user id
    pub async fn find(&self, user_id: &str) -> RepoResult<Option<OnboardingState>> {
        self.base.find(ONBOARDING, user_id).await
    }

    /// Mark onboarding finished; repeat calls only refresh the record
    pub async fn finish(
        &self,
        user_id: &str,
        tenant_id: Option<&str>,
        skipped: bool,
    ) -> RepoResult<OnboardingState> {
        self.base
            .upsert(
                ONBOARDING,
                user_id,
                &json!({
                    "completed": true,
                    "skipped": skipped,
                    "completed_at": Utc::now(),
                    "tenant_id": tenant_id,
                }),
            )
            .await
    }
}
