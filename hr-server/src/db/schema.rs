//! Schema definitions
//!
//! Tables stay schemaless; only the indexes that enforce uniqueness (and the
//! lookups every request does) are defined. Applied on every start.

pub const SCHEMA: &str = r#"
DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;
DEFINE INDEX IF NOT EXISTS user_role ON TABLE user FIELDS role;

DEFINE INDEX IF NOT EXISTS employee_code_tenant ON TABLE employee FIELDS tenant_id, employee_id UNIQUE;
DEFINE INDEX IF NOT EXISTS employee_email_tenant ON TABLE employee FIELDS tenant_id, email UNIQUE;

DEFINE INDEX IF NOT EXISTS department_tenant ON TABLE department FIELDS tenant_id;
DEFINE INDEX IF NOT EXISTS leave_type_tenant ON TABLE leave_type FIELDS tenant_id;
DEFINE INDEX IF NOT EXISTS leave_request_tenant ON TABLE leave_request FIELDS tenant_id, status;

DEFINE INDEX IF NOT EXISTS attendance_user_date ON TABLE attendance FIELDS user_id, date UNIQUE;

DEFINE INDEX IF NOT EXISTS password_reset_token ON TABLE password_reset FIELDS token_hash UNIQUE;
DEFINE INDEX IF NOT EXISTS email_outbox_status ON TABLE email_outbox FIELDS status;

DEFINE INDEX IF NOT EXISTS project_client ON TABLE project FIELDS client_id;
DEFINE INDEX IF NOT EXISTS task_project ON TABLE task FIELDS project_id;
DEFINE INDEX IF NOT EXISTS timesheet_user_date ON TABLE timesheet_entry FIELDS user_id, date;
DEFINE INDEX IF NOT EXISTS timesheet_project ON TABLE timesheet_entry FIELDS project_id;
"#;

/// Table names
pub mod tables {
    pub const USER: &str = "user";
    pub const TENANT: &str = "tenant";
    pub const DEPARTMENT: &str = "department";
    pub const EMPLOYEE: &str = "employee";
    pub const LEAVE_TYPE: &str = "leave_type";
    pub const LEAVE_REQUEST: &str = "leave_request";
    pub const ATTENDANCE: &str = "attendance";
    pub const ONBOARDING: &str = "onboarding";
    pub const EMAIL_SETTINGS: &str = "email_settings";
    pub const EMAIL_OUTBOX: &str = "email_outbox";
    pub const PASSWORD_RESET: &str = "password_reset";
    pub const CLIENT: &str = "client";
    pub const PROJECT: &str = "project";
    pub const TASK: &str = "task";
    pub const TIMESHEET_ENTRY: &str = "timesheet_entry";
}
