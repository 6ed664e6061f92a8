//! Client, Project and Task models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Client {
    pub fn new(data: ClientCreate, tenant_id: Option<String>) -> Self {
        Self {
            id: String::new(),
            name: data.name,
            code: data.code,
            email: data.email,
            is_active: true,
            tenant_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    pub name: String,
    pub code: String,
    pub client_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_billable: bool,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1))]
    pub client_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "serde_helpers::default_true")]
    pub is_billable: bool,
    #[validate(range(min = 0.0))]
    pub hourly_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_billable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Project {
    pub fn new(data: ProjectCreate, tenant_id: Option<String>) -> Self {
        Self {
            id: String::new(),
            name: data.name,
            code: data.code,
            client_id: data.client_id,
            description: data.description,
            is_billable: data.is_billable,
            hourly_rate: data.hourly_rate,
            is_active: true,
            tenant_id,
            created_at: Utc::now(),
        }
    }
}

/// Project read-back with hours rolled up across all of its entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub logged_hours: f64,
    pub billable_hours: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectQuery {
    pub client_id: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, with = "serde_helpers::record_key")]
    pub id: String,
    pub name: String,
    pub project_id: String,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_billable: bool,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub project_id: String,
    #[serde(default = "serde_helpers::default_true")]
    pub is_billable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_billable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Task {
    pub fn new(data: TaskCreate, tenant_id: Option<String>) -> Self {
        Self {
            id: String::new(),
            name: data.name,
            project_id: data.project_id,
            is_billable: data.is_billable,
            is_active: true,
            tenant_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskQuery {
    pub project_id: Option<String>,
}
