//! Leave policy and leave request models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveType {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    pub name: String,
    pub code: String,
    pub days_allowed: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub carry_forward: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub encashable: bool,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LeaveTypeCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(range(min = 0, max = 366))]
    pub days_allowed: i64,
    #[serde(default)]
    pub carry_forward: bool,
    #[serde(default)]
    pub encashable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LeaveTypeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 366))]
    pub days_allowed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carry_forward: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encashable: Option<bool>,
}

impl LeaveType {
    pub fn new(data: LeaveTypeCreate, tenant_id: Option<String>) -> Self {
        Self {
            id: String::new(),
            name: data.name,
            code: data.code,
            days_allowed: data.days_allowed,
            carry_forward: data.carry_forward,
            encashable: data.encashable,
            tenant_id,
            created_at: Utc::now(),
        }
    }
}

/// Leave request status
///
/// `pending` on creation; approve/reject overwrite whatever is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    /// Employee record linked by the requester's email, if any
    #[serde(default)]
    pub employee_id: Option<String>,
    pub user_id: String,
    pub leave_type_id: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub half_day: bool,
    pub status: LeaveStatus,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejected_by: Option<String>,
    #[serde(default)]
    pub rejected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LeaveRequestCreate {
    #[validate(length(min = 1))]
    pub leave_type_id: String,
    pub start_date: String,
    pub end_date: String,
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
    #[serde(default)]
    pub half_day: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaveRequestQuery {
    pub status: Option<LeaveStatus>,
    pub employee_id: Option<String>,
}
