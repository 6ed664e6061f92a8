//! Onboarding models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::Role;
use validator::Validate;

use super::organization::{Department, DepartmentCreate, Employee};
use super::leave::{LeaveType, LeaveTypeCreate};
use super::serde_helpers;

/// Per-user onboarding flag, keyed by the user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingState {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub completed: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub skipped: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingStatus {
    pub departments_created: bool,
    pub leave_types_created: bool,
    pub employees_invited: bool,
    pub completed: bool,
    pub skipped: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingFlag {
    pub completed: bool,
    pub skipped: bool,
}

/// Items are validated one by one during the batch
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkDepartments {
    pub departments: Vec<DepartmentCreate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkLeaveTypes {
    pub leave_types: Vec<LeaveTypeCreate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmployeeInvite {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
    /// Generated from the email when absent
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkEmployees {
    pub employees: Vec<EmployeeInvite>,
}

/// One item of a bulk request that could not be created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkFailure {
    pub index: usize,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDepartmentsResult {
    pub departments: Vec<Department>,
    pub failed: Vec<BulkFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkLeaveTypesResult {
    pub leave_types: Vec<LeaveType>,
    pub failed: Vec<BulkFailure>,
}

/// Temporary password of an invitee whose welcome email was not queued
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedCredential {
    pub email: String,
    pub temporary_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkEmployeesResult {
    pub employees: Vec<Employee>,
    pub skipped: Vec<String>,
    pub failed: Vec<BulkFailure>,
    pub credentials: Vec<IssuedCredential>,
    pub emails_queued: usize,
}
