//! Department Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoError, RepoResult, in_scope, touched};
use crate::db::models::{Department, DepartmentUpdate};
use crate::db::schema::tables::DEPARTMENT;

#[derive(Clone)]
pub struct DepartmentRepository {
    base: BaseRepository,
}

impl DepartmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, tenant: Option<&str>) -> RepoResult<Vec<Department>> {
        self.base
            .select(DEPARTMENT, Filter::new().tenant(tenant), "ORDER BY name")
            .await
    }

    /// `None` for unknown ids and for departments of another tenant
    pub async fn find_by_id(&self, id: &str, tenant: Option<&str>) -> RepoResult<Option<Department>> {
        let dept: Option<Department> = self.base.find(DEPARTMENT, id).await?;
        Ok(dept.filter(|d| in_scope(d.tenant_id.as_deref(), tenant)))
    }

    pub async fn create(&self, dept: &Department) -> RepoResult<Department> {
        self.base.create(DEPARTMENT, dept).await
    }

    pub async fn update(
        &self,
        id: &str,
        tenant: Option<&str>,
        data: &DepartmentUpdate,
    ) -> RepoResult<Department> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Department {id} not found")))?;
        self.base
            .merge(DEPARTMENT, id, &touched(data)?)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Department {id} not found")))
    }

    /// Employees keep their `department_id`; nothing cascades
    pub async fn delete(&self, id: &str, tenant: Option<&str>) -> RepoResult<()> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Department {id} not found")))?;
        self.base.delete::<Department>(DEPARTMENT, id).await?;
        Ok(())
    }

    pub async fn count(&self, tenant: Option<&str>) -> RepoResult<i64> {
        self.base.count(DEPARTMENT, Filter::new().tenant(tenant)).await
    }
}
