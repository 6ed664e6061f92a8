//! Client Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoError, RepoResult, in_scope};
use crate::db::models::{Client, ClientUpdate};
use crate::db::schema::tables::CLIENT;

#[derive(Clone)]
pub struct ClientRepository {
    base: BaseRepository,
}

impl ClientRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, tenant: Option<&str>) -> RepoResult<Vec<Client>> {
        self.base
            .select(CLIENT, Filter::new().tenant(tenant), "ORDER BY name")
            .await
    }

    pub async fn find_by_id(&self, id: &str, tenant: Option<&str>) -> RepoResult<Option<Client>> {
        let client: Option<Client> = self.base.find(CLIENT, id).await?;
        Ok(client.filter(|c| in_scope(c.tenant_id.as_deref(), tenant)))
    }

    pub async fn create(&self, client: &Client) -> RepoResult<Client> {
        self.base.create(CLIENT, client).await
    }

    pub async fn update(&self, id: &str, tenant: Option<&str>, data: &ClientUpdate) -> RepoResult<Client> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Client {id} not found")))?;
        self.base
            .merge(CLIENT, id, data)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Client {id} not found")))
    }

    pub async fn delete(&self, id: &str, tenant: Option<&str>) -> RepoResult<()> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Client {id} not found")))?;
        self.base.delete::<Client>(CLIENT, id).await?;
        Ok(())
    }
}
