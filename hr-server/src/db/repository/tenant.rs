//! Tenant Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoResult};
use crate::db::models::Tenant;
use crate::db::schema::tables::TENANT;

#[derive(Clone)]
pub struct TenantRepository {
    base: BaseRepository,
}

impl TenantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Tenant>> {
        self.base
            .select(TENANT, Filter::new(), "ORDER BY created_at DESC")
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Tenant>> {
        self.base.find(TENANT, id).await
    }

    pub async fn create(&self, tenant: &Tenant) -> RepoResult<Tenant> {
        self.base.create(TENANT, tenant).await
    }
}
