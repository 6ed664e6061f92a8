//! Leave Request Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoError, RepoResult, in_scope};
use crate::db::models::{LeaveRequest, LeaveStatus};
use crate::db::schema::tables::LEAVE_REQUEST;

#[derive(Clone)]
pub struct LeaveRequestRepository {
    base: BaseRepository,
}

impl LeaveRequestRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, request: &LeaveRequest) -> RepoResult<LeaveRequest> {
        self.base.create(LEAVE_REQUEST, request).await
    }

    /// Newest first
    pub async fn find_all(&self, filter: Filter) -> RepoResult<Vec<LeaveRequest>> {
        self.base
            .select(LEAVE_REQUEST, filter, "ORDER BY created_at DESC")
            .await
    }

    pub async fn find_by_id(&self, id: &str, tenant: Option<&str>) -> RepoResult<Option<LeaveRequest>> {
        let req: Option<LeaveRequest> = self.base.find(LEAVE_REQUEST, id).await?;
        Ok(req.filter(|r| in_scope(r.tenant_id.as_deref(), tenant)))
    }

    /// Record an approve/reject decision
    ///
    /// Whatever status is stored gets overwritten, including a previous
    /// decision.
    pub async fn decide(
        &self,
        id: &str,
        tenant: Option<&str>,
        status: LeaveStatus,
        decided_by: &str,
    ) -> RepoResult<LeaveRequest> {
        self.find_by_id(id, tenant)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Leave request {id} not found")))?;

        let sql = match status {
            LeaveStatus::Approved => {
                "UPDATE type::thing($tb, $key) SET status = $status, approved_by = $by, approved_at = $at RETURN AFTER"
            }
            LeaveStatus::Rejected => {
                "UPDATE type::thing($tb, $key) SET status = $status, rejected_by = $by, rejected_at = $at RETURN AFTER"
            }
            LeaveStatus::Pending => {
                return Err(RepoError::Validation("Cannot decide a request back to pending".into()));
            }
        };
        let updated: Option<LeaveRequest> = self
            .base
            .db()
            .query(sql)
            .bind(("tb", LEAVE_REQUEST))
            .bind(("key", id.to_string()))
            .bind(("status", status.as_str()))
            .bind(("by", decided_by.to_string()))
            .bind(("at", Utc::now()))
            .await?
            .take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Leave request {id} not found")))
    }

    pub async fn count_pending(&self, tenant: Option<&str>) -> RepoResult<i64> {
        self.base
            .count(
                LEAVE_REQUEST,
                Filter::new()
                    .tenant(tenant)
                    .eq("status", LeaveStatus::Pending.as_str()),
            )
            .await
    }
}
