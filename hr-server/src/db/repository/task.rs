//! Task Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoError, RepoResult, in_scope};
use crate::db::models::{Task, TaskQuery, TaskUpdate};
use crate::db::schema::tables::TASK;

#[derive(Clone)]
pub struct TaskRepository {
    base: BaseRepository,
}

impl TaskRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, tenant: Option<&str>, query: &TaskQuery) -> RepoResult<Vec<Task>> {
        let filter = Filter::new()
            .tenant(tenant)
            .eq_opt("project_id", query.project_id.clone());
        self.base.select(TASK, filter, "ORDER BY name").await
    }

    pub async fn find_by_id(&self, id: &str, tenant: Option<&str>) -> RepoResult<Option<Task>> {
        let task: Option<Task> = self.base.find(TASK, id).await?;
        Ok(task.filter(|t| in_scope(t.tenant_id.as_deref(), tenant)))
    }

    pub async fn create(&self, task: &Task) -> RepoResult<Task> {
        self.base.create(TASK, task).await
    }

    pub async fn update(&self, id: &str, tenant: Option<&str>, data: &TaskUpdate) -> RepoResult<Task> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {id} not found")))?;
        self.base
            .merge(TASK, id, data)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {id} not found")))
    }

    pub async fn delete(&self, id: &str, tenant: Option<&str>) -> RepoResult<()> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {id} not found")))?;
        self.base.delete::<Task>(TASK, id).await?;
        Ok(())
    }
}
