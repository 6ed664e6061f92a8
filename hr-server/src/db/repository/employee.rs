//! Employee Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoError, RepoResult, in_scope, touched};
use crate::db::models::{Employee, EmployeeQuery, EmployeeUpdate, normalize_email};
use crate::db::schema::tables::EMPLOYEE;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, tenant: Option<&str>, query: &EmployeeQuery) -> RepoResult<Vec<Employee>> {
        let mut filter = Filter::new()
            .tenant(tenant)
            .eq_opt("status", query.status.clone())
            .eq_opt("department_id", query.department_id.clone());
        if let Some(term) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            filter = filter.search(&["full_name", "email", "employee_id"], term);
        }
        self.base.select(EMPLOYEE, filter, "ORDER BY full_name").await
    }

    pub async fn find_by_id(&self, id: &str, tenant: Option<&str>) -> RepoResult<Option<Employee>> {
        let emp: Option<Employee> = self.base.find(EMPLOYEE, id).await?;
        Ok(emp.filter(|e| in_scope(e.tenant_id.as_deref(), tenant)))
    }

    /// Employee record of a tenant with this email
    pub async fn find_by_email(&self, email: &str, tenant: Option<&str>) -> RepoResult<Option<Employee>> {
        let filter = Filter::new()
            .eq("email", normalize_email(email))
            .tenant(tenant);
        let rows: Vec<Employee> = self.base.select(EMPLOYEE, filter, "LIMIT 1").await?;
        Ok(rows.into_iter().next())
    }

    /// Insert; a taken (tenant, code) or (tenant, email) is `RepoError::Duplicate`
    pub async fn create(&self, emp: &Employee) -> RepoResult<Employee> {
        self.base.create(EMPLOYEE, emp).await
    }

    pub async fn update(
        &self,
        id: &str,
        tenant: Option<&str>,
        data: &EmployeeUpdate,
    ) -> RepoResult<Employee> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))?;
        let mut data = data.clone();
        data.email = data.email.as_deref().map(normalize_email);
        self.base
            .merge(EMPLOYEE, id, &touched(&data)?)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
    }

    pub async fn delete(&self, id: &str, tenant: Option<&str>) -> RepoResult<()> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))?;
        self.base.delete::<Employee>(EMPLOYEE, id).await?;
        Ok(())
    }

    pub async fn count(&self, tenant: Option<&str>) -> RepoResult<i64> {
        self.base.count(EMPLOYEE, Filter::new().tenant(tenant)).await
    }

    pub async fn count_active(&self, tenant: Option<&str>) -> RepoResult<i64> {
        self.base
            .count(EMPLOYEE, Filter::new().tenant(tenant).eq("status", "active"))
            .await
    }
}
