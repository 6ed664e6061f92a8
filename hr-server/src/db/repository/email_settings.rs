//! Email Settings Repository
//!
//! One record per tenant, keyed by the tenant id (`platform` when the
//! settings belong to no tenant).

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::models::{EmailSettings, PLATFORM_SETTINGS_KEY};
use crate::db::schema::tables::EMAIL_SETTINGS;

pub fn settings_key(tenant: Option<&str>) -> &str {
    tenant.unwrap_or(PLATFORM_SETTINGS_KEY)
}

#[derive(Clone)]
pub struct EmailSettingsRepository {
    base: BaseRepository,
}

impl EmailSettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find(&self, tenant: Option<&str>) -> RepoResult<Option<EmailSettings>> {
        self.base.find(EMAIL_SETTINGS, settings_key(tenant)).await
    }

    pub async fn save(&self, tenant: Option<&str>, settings: &EmailSettings) -> RepoResult<EmailSettings> {
        self.base
            .upsert(EMAIL_SETTINGS, settings_key(tenant), settings)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_key() {
        assert_eq!(settings_key(Some("abc")), "abc");
        assert_eq!(settings_key(None), "platform");
    }
}
