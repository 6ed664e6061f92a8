//! Project Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoError, RepoResult, in_scope};
use crate::db::models::{Project, ProjectQuery, ProjectUpdate};
use crate::db::schema::tables::PROJECT;

#[derive(Clone)]
pub struct ProjectRepository {
    base: BaseRepository,
}

impl ProjectRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, tenant: Option<&str>, query: &ProjectQuery) -> RepoResult<Vec<Project>> {
        let filter = Filter::new()
            .tenant(tenant)
            .eq_opt("client_id", query.client_id.clone())
            .eq_opt("is_active", query.active);
        self.base.select(PROJECT, filter, "ORDER BY name").await
    }

    pub async fn find_by_id(&self, id: &str, tenant: Option<&str>) -> RepoResult<Option<Project>> {
        let project: Option<Project> = self.base.find(PROJECT, id).await?;
        Ok(project.filter(|p| in_scope(p.tenant_id.as_deref(), tenant)))
    }

    pub async fn create(&self, project: &Project) -> RepoResult<Project> {
        self.base.create(PROJECT, project).await
    }

    pub async fn update(&self, id: &str, tenant: Option<&str>, data: &ProjectUpdate) -> RepoResult<Project> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Project {id} not found")))?;
        self.base
            .merge(PROJECT, id, data)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Project {id} not found")))
    }

    pub async fn delete(&self, id: &str, tenant: Option<&str>) -> RepoResult<()> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Project {id} not found")))?;
        self.base.delete::<Project>(PROJECT, id).await?;
        Ok(())
    }
}
