//! Tenant, Department and Employee models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;

// =============================================================================
// Tenant
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    pub name: String,
    pub domain: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default = "empty_object")]
    pub settings: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TenantCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 253))]
    pub domain: String,
    pub industry: Option<String>,
}

// =============================================================================
// Department
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub head_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepartmentCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub head_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DepartmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Department {
    pub fn new(data: DepartmentCreate, tenant_id: Option<String>) -> Self {
        Self {
            id: String::new(),
            name: data.name,
            code: data.code,
            description: data.description,
            head_id: data.head_id,
            parent_id: data.parent_id,
            tenant_id,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

// =============================================================================
// Employee
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    /// Human-facing employee code, unique per tenant
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub date_of_joining: Option<String>,
    #[serde(default)]
    pub reporting_to: Option<String>,
    #[serde(default = "default_employment_type")]
    pub employment_type: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

pub fn default_employment_type() -> String {
    "full-time".to_string()
}

pub fn default_status() -> String {
    "active".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, max = 50))]
    pub employee_id: String,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub date_of_joining: Option<String>,
    #[serde(default)]
    pub reporting_to: Option<String>,
    #[serde(default = "default_employment_type")]
    pub employment_type: String,
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Employee {
    pub fn new(data: EmployeeCreate, tenant_id: Option<String>, created_by: Option<String>) -> Self {
        Self {
            id: String::new(),
            employee_id: data.employee_id,
            full_name: data.full_name,
            email: super::user::normalize_email(&data.email),
            phone: data.phone,
            department_id: data.department_id,
            designation: data.designation,
            date_of_joining: data.date_of_joining,
            reporting_to: data.reporting_to,
            employment_type: data.employment_type,
            status: data.status,
            tenant_id,
            created_by,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Query parameters for `GET /api/employees`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeQuery {
    pub status: Option<String>,
    pub department_id: Option<String>,
    /// Case-insensitive substring over name, email and code
    pub search: Option<String>,
}
