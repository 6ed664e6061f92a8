//! Email Outbox Repository

use chrono::Utc;
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoResult};
use crate::db::models::{OutboxEmail, OutboxStatus};
use crate::db::schema::tables::EMAIL_OUTBOX;

#[derive(Clone)]
pub struct OutboxRepository {
    base: BaseRepository,
}

impl OutboxRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn enqueue(&self, email: &OutboxEmail) -> RepoResult<OutboxEmail> {
        self.base.create(EMAIL_OUTBOX, email).await
    }

    /// Oldest pending rows first
    pub async fn pending(&self, limit: usize) -> RepoResult<Vec<OutboxEmail>> {
        self.base
            .select(
                EMAIL_OUTBOX,
                Filter::new().eq("status", "pending"),
                &format!("ORDER BY created_at LIMIT {limit}"),
            )
            .await
    }

    pub async fn find_all(&self) -> RepoResult<Vec<OutboxEmail>> {
        self.base
            .select(EMAIL_OUTBOX, Filter::new(), "ORDER BY created_at")
            .await
    }

    pub async fn mark_sent(&self, id: &str) -> RepoResult<()> {
        self.base
            .merge::<OutboxEmail, _>(
                EMAIL_OUTBOX,
                id,
                &json!({ "status": OutboxStatus::Sent, "sent_at": Utc::now() }),
            )
            .await?;
        Ok(())
    }

    /// Count a failed attempt; the row stays pending until `give_up`
    pub async fn record_failure(&self, id: &str, attempts: u32, error: &str, give_up: bool) -> RepoResult<()> {
        let status = if give_up {
            OutboxStatus::Failed
        } else {
            OutboxStatus::Pending
        };
        self.base
            .merge::<OutboxEmail, _>(
                EMAIL_OUTBOX,
                id,
                &json!({ "status": status, "attempts": attempts, "last_error": error }),
            )
            .await?;
        Ok(())
    }
}
