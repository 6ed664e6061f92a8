//! Repository Module
//!
//! Data access for every SurrealDB table. Handlers never write SurrealQL.

// Identity
pub mod password_reset;
pub mod user;

// Organization
pub mod department;
pub mod employee;
pub mod tenant;

// Leave & attendance
pub mod attendance;
pub mod leave_request;
pub mod leave_type;

// Onboarding & notification
pub mod email_settings;
pub mod onboarding;
pub mod outbox;

// Billing
pub mod client;
pub mod project;
pub mod task;
pub mod timesheet;

pub use attendance::AttendanceRepository;
pub use client::ClientRepository;
pub use department::DepartmentRepository;
pub use email_settings::EmailSettingsRepository;
pub use employee::EmployeeRepository;
pub use leave_request::LeaveRequestRepository;
pub use leave_type::LeaveTypeRepository;
pub use onboarding::OnboardingRepository;
pub use outbox::OutboxRepository;
pub use password_reset::PasswordResetRepository;
pub use project::ProjectRepository;
pub use task::TaskRepository;
pub use tenant::TenantRepository;
pub use timesheet::TimesheetRepository;
pub use user::UserRepository;

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

use crate::db::id;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violation: "Database index `x` already contains ..."
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention
// =============================================================================
//
// Records live at `table:key` where key is a 24-char hex string from
// `db::id::new_key()`. Models carry only the key (`serde_helpers::record_key`);
// references between records are stored as plain key strings.

/// Base repository with database reference and generic record helpers
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Insert `record` under a freshly generated key
    pub async fn create<T>(&self, table: &'static str, record: &T) -> RepoResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        self.create_with_key(table, &id::new_key(), record).await
    }

    /// Insert `record` under a caller-chosen key
    pub async fn create_with_key<T>(
        &self,
        table: &'static str,
        key: &str,
        record: &T,
    ) -> RepoResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let content = to_content(record)?;
        let mut result = self
            .db
            .query("CREATE type::thing($tb, $key) CONTENT $data RETURN AFTER")
            .bind(("tb", table))
            .bind(("key", key.to_string()))
            .bind(("data", content))
            .await?;
        let created: Option<T> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database(format!("Failed to create {table}")))
    }

    /// Fetch by key
    pub async fn find<T>(&self, table: &'static str, key: &str) -> RepoResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let record: Option<T> = self.db.select(RecordId::from_table_key(table, key)).await?;
        Ok(record)
    }

    /// Merge `patch` into an existing record; `None` if it does not exist
    pub async fn merge<T, P>(&self, table: &'static str, key: &str, patch: &P) -> RepoResult<Option<T>>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let content = to_content(patch)?;
        let mut result = self
            .db
            .query("UPDATE type::thing($tb, $key) MERGE $data RETURN AFTER")
            .bind(("tb", table))
            .bind(("key", key.to_string()))
            .bind(("data", content))
            .await?;
        let updated: Option<T> = result.take(0)?;
        Ok(updated)
    }

    /// Insert or merge at a fixed key
    pub async fn upsert<T, P>(&self, table: &'static str, key: &str, patch: &P) -> RepoResult<T>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let content = to_content(patch)?;
        let mut result = self
            .db
            .query("UPSERT type::thing($tb, $key) MERGE $data RETURN AFTER")
            .bind(("tb", table))
            .bind(("key", key.to_string()))
            .bind(("data", content))
            .await?;
        let stored: Option<T> = result.take(0)?;
        stored.ok_or_else(|| RepoError::Database(format!("Failed to upsert {table}")))
    }

    /// Delete by key; returns the removed record
    pub async fn delete<T>(&self, table: &'static str, key: &str) -> RepoResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let mut result = self
            .db
            .query("DELETE type::thing($tb, $key) RETURN BEFORE")
            .bind(("tb", table))
            .bind(("key", key.to_string()))
            .await?;
        let removed: Option<T> = result.take(0)?;
        Ok(removed)
    }

    /// `SELECT * FROM table WHERE ... ORDER BY ...`
    pub async fn select<T>(&self, table: &'static str, filter: Filter, order: &str) -> RepoResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let sql = format!("SELECT * FROM {table}{} {order}", filter.where_clause());
        let rows: Vec<T> = self
            .db
            .query(sql)
            .bind(filter.into_params())
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Count rows matching `filter`
    pub async fn count(&self, table: &'static str, filter: Filter) -> RepoResult<i64> {
        let sql = format!(
            "SELECT count() AS total FROM {table}{} GROUP ALL",
            filter.where_clause()
        );
        let total: Option<i64> = self
            .db
            .query(sql)
            .bind(filter.into_params())
            .await?
            .take((0, "total"))?;
        Ok(total.unwrap_or(0))
    }
}

/// Serialize a model for storage
///
/// Drops `id` (the key lives in the record id) and every null field, so an
/// unset optional is stored as NONE rather than NULL.
pub fn to_content<T: Serialize>(value: &T) -> RepoResult<serde_json::Value> {
    let mut json = serde_json::to_value(value)
        .map_err(|e| RepoError::Validation(format!("Unserializable record: {e}")))?;
    if let Some(obj) = json.as_object_mut() {
        obj.remove("id");
        obj.retain(|_, v| !v.is_null());
    }
    Ok(json)
}

/// Storage content plus an `updated_at` stamp
pub fn touched<T: Serialize>(value: &T) -> RepoResult<serde_json::Value> {
    let mut json = to_content(value)?;
    if let Some(obj) = json.as_object_mut() {
        obj.insert(
            "updated_at".to_string(),
            serde_json::to_value(chrono::Utc::now())
                .map_err(|e| RepoError::Validation(e.to_string()))?,
        );
    }
    Ok(json)
}

/// A record is visible when the caller is a platform user or shares its tenant
pub fn in_scope(record_tenant: Option<&str>, caller_tenant: Option<&str>) -> bool {
    caller_tenant.is_none() || record_tenant == caller_tenant
}

/// WHERE clause builder with numbered bind parameters
#[derive(Debug, Default, Clone)]
pub struct Filter {
    clauses: Vec<String>,
    params: BTreeMap<String, serde_json::Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    fn param(&mut self, value: serde_json::Value) -> String {
        let name = format!("p{}", self.params.len());
        self.params.insert(name.clone(), value);
        name
    }

    /// `field <op> value`
    pub fn cmp(mut self, field: &str, op: &str, value: impl Into<serde_json::Value>) -> Self {
        let p = self.param(value.into());
        self.clauses.push(format!("{field} {op} ${p}"));
        self
    }

    pub fn eq(self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.cmp(field, "=", value)
    }

    /// Equality only when a value is given
    pub fn eq_opt<V: Into<serde_json::Value>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.eq(field, v),
            None => self,
        }
    }

    /// Tenant scope: platform users (no tenant) see everything
    pub fn tenant(self, tenant_id: Option<&str>) -> Self {
        self.eq_opt("tenant_id", tenant_id.map(str::to_string))
    }

    /// `field IN [values]`
    pub fn any_of(mut self, field: &str, values: &[&str]) -> Self {
        let p = self.param(serde_json::Value::from(
            values.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
        ));
        self.clauses.push(format!("{field} IN ${p}"));
        self
    }

    /// Case-insensitive substring match over several string fields
    pub fn search(mut self, fields: &[&str], term: &str) -> Self {
        let p = self.param(serde_json::Value::from(term.to_lowercase()));
        let ors: Vec<String> = fields
            .iter()
            .map(|f| format!("string::contains(string::lowercase({f} ?? ''), ${p})"))
            .collect();
        self.clauses.push(format!("({})", ors.join(" OR ")));
        self
    }

    /// Inclusive range on a `YYYY-MM-DD` field
    pub fn date_range(self, field: &str, start: Option<&str>, end: Option<&str>) -> Self {
        let this = match start {
            Some(s) => self.cmp(field, ">=", s.to_string()),
            None => self,
        };
        match end {
            Some(e) => this.cmp(field, "<=", e.to_string()),
            None => this,
        }
    }

    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn into_params(self) -> BTreeMap<String, serde_json::Value> {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_builds_numbered_params() {
        let filter = Filter::new()
            .tenant(Some("t1"))
            .eq_opt::<String>("status", None)
            .eq("status", "pending")
            .date_range("date", Some("2024-01-01"), Some("2024-01-31"));

        assert_eq!(
            filter.where_clause(),
            " WHERE tenant_id = $p0 AND status = $p1 AND date >= $p2 AND date <= $p3"
        );
        let params = filter.into_params();
        assert_eq!(params["p0"], "t1");
        assert_eq!(params["p3"], "2024-01-31");
    }

    #[test]
    fn test_platform_scope_has_no_clause() {
        assert_eq!(Filter::new().tenant(None).where_clause(), "");
    }

    #[test]
    fn test_search_clause() {
        let filter = Filter::new().search(&["full_name", "email"], "JaNe");
        assert!(filter.where_clause().contains(" OR "));
        assert_eq!(filter.into_params()["p0"], "jane");
    }

    #[test]
    fn test_to_content_drops_id_and_nulls() {
        #[derive(Serialize)]
        struct Row {
            id: String,
            name: String,
            note: Option<String>,
        }
        let content = to_content(&Row {
            id: "abc".into(),
            name: "x".into(),
            note: None,
        })
        .unwrap();
        assert_eq!(content, serde_json::json!({"name": "x"}));
    }

    #[test]
    fn test_scope() {
        assert!(in_scope(Some("t1"), None));
        assert!(in_scope(Some("t1"), Some("t1")));
        assert!(!in_scope(Some("t1"), Some("t2")));
        assert!(!in_scope(None, Some("t2")));
    }

    #[test]
    fn test_duplicate_mapping() {
        let err = RepoError::from(surrealdb::Error::Api(surrealdb::error::Api::Query(
            "Database index `user_email` already contains 'a@b.com'".into(),
        )));
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
