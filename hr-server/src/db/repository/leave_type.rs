//! Leave Type Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoError, RepoResult, in_scope};
use crate::db::models::{LeaveType, LeaveTypeUpdate};
use crate::db::schema::tables::LEAVE_TYPE;

#[derive(Clone)]
pub struct LeaveTypeRepository {
    base: BaseRepository,
}

impl LeaveTypeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, tenant: Option<&str>) -> RepoResult<Vec<LeaveType>> {
        self.base
            .select(LEAVE_TYPE, Filter::new().tenant(tenant), "ORDER BY name")
            .await
    }

    pub async fn find_by_id(&self, id: &str, tenant: Option<&str>) -> RepoResult<Option<LeaveType>> {
        let lt: Option<LeaveType> = self.base.find(LEAVE_TYPE, id).await?;
        Ok(lt.filter(|t| in_scope(t.tenant_id.as_deref(), tenant)))
    }

    pub async fn create(&self, leave_type: &LeaveType) -> RepoResult<LeaveType> {
        self.base.create(LEAVE_TYPE, leave_type).await
    }

    pub async fn update(
        &self,
        id: &str,
        tenant: Option<&str>,
        data: &LeaveTypeUpdate,
    ) -> RepoResult<LeaveType> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Leave type {id} not found")))?;
        self.base
            .merge(LEAVE_TYPE, id, data)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Leave type {id} not found")))
    }

    pub async fn delete(&self, id: &str, tenant: Option<&str>) -> RepoResult<()> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Leave type {id} not found")))?;
        self.base.delete::<LeaveType>(LEAVE_TYPE, id).await?;
        Ok(())
    }

    pub async fn count(&self, tenant: Option<&str>) -> RepoResult<i64> {
        self.base.count(LEAVE_TYPE, Filter::new().tenant(tenant)).await
    }
}
