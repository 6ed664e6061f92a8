//! Timesheet Entry Repository
//!
//! Status transitions are conditional updates: the WHERE clause carries the
//! allowed source states, so a locked entry is never touched.

use chrono::{DateTime, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoResult, in_scope, to_content};
use crate::db::models::{EntryPatch, EntryStatus, TimesheetEntry};
use crate::db::schema::tables::TIMESHEET_ENTRY;

#[derive(Clone)]
pub struct TimesheetRepository {
    base: BaseRepository,
}

impl TimesheetRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, entry: &TimesheetEntry) -> RepoResult<TimesheetEntry> {
        self.base.create(TIMESHEET_ENTRY, entry).await
    }

    pub async fn find_by_id(&self, id: &str, tenant: Option<&str>) -> RepoResult<Option<TimesheetEntry>> {
        let entry: Option<TimesheetEntry> = self.base.find(TIMESHEET_ENTRY, id).await?;
        Ok(entry.filter(|e| in_scope(e.tenant_id.as_deref(), tenant)))
    }

    pub async fn find_all(&self, filter: Filter) -> RepoResult<Vec<TimesheetEntry>> {
        self.base
            .select(TIMESHEET_ENTRY, filter, "ORDER BY date, created_at")
            .await
    }

    /// Apply an owner's edit if the entry is still editable
    pub async fn update_editable(
        &self,
        id: &str,
        owner: &str,
        patch: &EntryPatch,
    ) -> RepoResult<Option<TimesheetEntry>> {
        let mut data = to_content(patch)?;
        // An absent task must clear the stored one
        if patch.task_id.is_none() {
            if let Some(obj) = data.as_object_mut() {
                obj.insert("task_id".to_string(), serde_json::Value::Null);
            }
        }
        let rows: Vec<TimesheetEntry> = self
            .base
            .db()
            .query(
                "UPDATE type::thing($tb, $key) MERGE $data \
                 WHERE user_id = $owner AND status IN ['draft', 'rejected'] RETURN AFTER",
            )
            .bind(("tb", TIMESHEET_ENTRY))
            .bind(("key", id.to_string()))
            .bind(("data", data))
            .bind(("owner", owner.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Delete an owner's entry if it is still editable
    pub async fn delete_editable(&self, id: &str, owner: &str) -> RepoResult<Option<TimesheetEntry>> {
        let rows: Vec<TimesheetEntry> = self
            .base
            .db()
            .query(
                "DELETE type::thing($tb, $key) \
                 WHERE user_id = $owner AND status IN ['draft', 'rejected'] RETURN BEFORE",
            )
            .bind(("tb", TIMESHEET_ENTRY))
            .bind(("key", id.to_string()))
            .bind(("owner", owner.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Move the user's drafts in `[start, end]` to submitted
    pub async fn submit_week(
        &self,
        user_id: &str,
        start: &str,
        end: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<usize> {
        let rows: Vec<TimesheetEntry> = self
            .base
            .db()
            .query(
                "UPDATE timesheet_entry SET status = 'submitted', submitted_at = $now \
                 WHERE user_id = $user AND status = 'draft' \
                 AND date >= $start AND date <= $end RETURN AFTER",
            )
            .bind(("now", now))
            .bind(("user", user_id.to_string()))
            .bind(("start", start.to_string()))
            .bind(("end", end.to_string()))
            .await?
            .take(0)?;
        Ok(rows.len())
    }

    /// Approve or reject every submitted entry of a user's week
    #[allow(clippy::too_many_arguments)]
    pub async fn decide_week(
        &self,
        user_id: &str,
        tenant: Option<&str>,
        start: &str,
        end: &str,
        status: EntryStatus,
        decided_by: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<usize> {
        let scope = Filter::new()
            .eq("user_id", user_id.to_string())
            .eq("status", EntryStatus::Submitted.as_str())
            .tenant(tenant)
            .date_range("date", Some(start), Some(end));
        let sql = format!(
            "UPDATE timesheet_entry SET status = $status, decided_by = $by, decided_at = $now{} RETURN AFTER",
            scope.where_clause()
        );
        let rows: Vec<TimesheetEntry> = self
            .base
            .db()
            .query(sql)
            .bind(scope.into_params())
            .bind(("status", status.as_str()))
            .bind(("by", decided_by.to_string()))
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(rows.len())
    }

    /// Hours logged against a project, total and billable, across all statuses
    pub async fn project_hours(&self, project_id: &str) -> RepoResult<(f64, f64)> {
        let entries = self
            .find_all(Filter::new().eq("project_id", project_id.to_string()))
            .await?;
        Ok(entries.iter().fold((0.0, 0.0), |(total, billable), e| {
            let billed = if e.is_billable { e.hours } else { 0.0 };
            (total + e.hours, billable + billed)
        }))
    }
}
