//! Timesheet Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use super::serde_helpers;

/// draft -> submitted -> approved | rejected; editing a rejected entry
/// puts it back to draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Owner may still change or delete the entry
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetEntry {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    /// `YYYY-MM-DD`
    pub date: String,
    pub hours: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub is_billable: bool,
    pub status: EntryStatus,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub decided_by: Option<String>,
    #[serde(default)]
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EntryCreate {
    #[validate(length(min = 1))]
    pub project_id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    pub date: String,
    pub hours: f64,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    /// Defaults to the project's flag
    #[serde(default)]
    pub is_billable: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EntryUpdate {
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub date: Option<String>,
    pub hours: Option<f64>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub is_billable: Option<bool>,
}

/// Storage patch for an entry edit
#[derive(Debug, Clone, Serialize)]
pub struct EntryPatch {
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub date: String,
    pub hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_billable: bool,
    pub status: EntryStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryQuery {
    pub week_start: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WeekRequest {
    pub week_start: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WeekDecision {
    #[validate(length(min = 1))]
    pub user_id: String,
    pub week_start: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResult {
    pub week_start: String,
    pub week_end: String,
    pub updated: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResult {
    pub updated: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryQuery {
    pub week_start: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklySummary {
    pub week_start: String,
    pub week_end: String,
    pub total_hours: f64,
    pub billable_hours: f64,
    pub non_billable_hours: f64,
    pub billable_percentage: f64,
    pub entries_by_status: BTreeMap<String, usize>,
    pub daily_hours: BTreeMap<String, f64>,
}

/// A submitted week waiting for a decision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingWeek {
    pub user_id: String,
    pub week_start: String,
    pub week_end: String,
    pub total_hours: f64,
    pub entries: usize,
}
