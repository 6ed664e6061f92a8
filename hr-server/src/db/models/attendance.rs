//! Attendance Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "present")]
    Present,
    #[serde(rename = "absent")]
    Absent,
    #[serde(rename = "half-day")]
    HalfDay,
    #[serde(rename = "on-leave")]
    OnLeave,
}

/// One record per (user, UTC day)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

/// Manual record (`POST /api/attendance`)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttendanceMark {
    #[validate(length(min = 1))]
    pub user_id: String,
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub user_id: Option<String>,
}

/// Response of clock-in / clock-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockResponse {
    pub message: String,
    pub time: DateTime<Utc>,
}
