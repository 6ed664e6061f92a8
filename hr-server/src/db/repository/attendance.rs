//! Attendance Repository
//!
//! Clock-in and clock-out are single conditional statements so concurrent
//! requests for the same (user, day) cannot both succeed.

use chrono::{DateTime, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, Filter, RepoError, RepoResult};
use crate::db::models::{AttendanceRecord, AttendanceStatus};
use crate::db::schema::tables::ATTENDANCE;

#[derive(Clone)]
pub struct AttendanceRepository {
    base: BaseRepository,
}

impl AttendanceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Newest day first
    pub async fn find_all(&self, filter: Filter) -> RepoResult<Vec<AttendanceRecord>> {
        self.base
            .select(ATTENDANCE, filter, "ORDER BY date DESC")
            .await
    }

    pub async fn find_for_day(&self, user_id: &str, date: &str) -> RepoResult<Option<AttendanceRecord>> {
        let filter = Filter::new()
            .eq("user_id", user_id.to_string())
            .eq("date", date.to_string());
        let rows: Vec<AttendanceRecord> = self.base.select(ATTENDANCE, filter, "LIMIT 1").await?;
        Ok(rows.into_iter().next())
    }

    /// Record a check-in for `date`
    ///
    /// Fills in a day record that has no check-in yet, otherwise creates one.
    /// A day that already has a check-in comes back as `RepoError::Duplicate`
    /// from the `(user_id, date)` unique index.
    pub async fn clock_in(
        &self,
        user_id: &str,
        tenant_id: Option<&str>,
        date: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<AttendanceRecord> {
        let updated: Vec<AttendanceRecord> = self
            .base
            .db()
            .query(
                "UPDATE attendance SET check_in = $now, status = 'present' \
                 WHERE user_id = $user AND date = $date AND check_in = NONE RETURN AFTER",
            )
            .bind(("now", now))
            .bind(("user", user_id.to_string()))
            .bind(("date", date.to_string()))
            .await?
            .take(0)?;
        if let Some(record) = updated.into_iter().next() {
            return Ok(record);
        }

        let record = AttendanceRecord {
            id: String::new(),
            user_id: user_id.to_string(),
            tenant_id: tenant_id.map(str::to_string),
            date: date.to_string(),
            check_in: Some(now),
            check_out: None,
            status: AttendanceStatus::Present,
            created_at: now,
        };
        self.base.create(ATTENDANCE, &record).await
    }

    /// Record a check-out; `None` when there is no open check-in for `date`
    pub async fn clock_out(
        &self,
        user_id: &str,
        date: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<AttendanceRecord>> {
        let updated: Vec<AttendanceRecord> = self
            .base
            .db()
            .query(
                "UPDATE attendance SET check_out = $now \
                 WHERE user_id = $user AND date = $date \
                 AND check_in != NONE AND check_out = NONE RETURN AFTER",
            )
            .bind(("now", now))
            .bind(("user", user_id.to_string()))
            .bind(("date", date.to_string()))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Manual record; replaces status and times of an existing day
    pub async fn upsert_day(&self, record: &AttendanceRecord) -> RepoResult<AttendanceRecord> {
        let Some(existing) = self.find_for_day(&record.user_id, &record.date).await? else {
            return self.base.create(ATTENDANCE, record).await;
        };
        let replacement = AttendanceRecord {
            created_at: existing.created_at,
            ..record.clone()
        };
        let stored: Option<AttendanceRecord> = self
            .base
            .db()
            .query("UPDATE type::thing($tb, $key) CONTENT $data RETURN AFTER")
            .bind(("tb", ATTENDANCE))
            .bind(("key", existing.id.clone()))
            .bind(("data", super::to_content(&replacement)?))
            .await?
            .take(0)?;
        stored.ok_or_else(|| RepoError::NotFound(format!("Attendance {} not found", existing.id)))
    }

    pub async fn count_present(&self, tenant: Option<&str>, date: &str) -> RepoResult<i64> {
        self.base
            .count(
                ATTENDANCE,
                Filter::new()
                    .tenant(tenant)
                    .eq("date", date.to_string())
                    .eq("status", "present"),
            )
            .await
    }
}
