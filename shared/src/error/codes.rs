//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Tenant and organization errors
//! - 4xxx: Leave errors
//! - 5xxx: Attendance errors
//! - 6xxx: Timesheet and billing errors
//! - 7xxx: Notification errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so the SPA can switch on it without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed (malformed body or field constraints)
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid date format
    InvalidDate = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Token subject no longer resolves to a user
    UserNotFound = 1005,
    /// Account is disabled
    AccountDisabled = 1006,
    /// Email is already registered
    EmailAlreadyRegistered = 1007,
    /// Password reset token is invalid, used or expired
    ResetTokenInvalid = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Role cannot be assigned through this operation
    RoleNotAssignable = 2002,

    // ==================== 3xxx: Tenant & organization ====================
    /// Tenant not found
    TenantNotFound = 3001,
    /// Department not found
    DepartmentNotFound = 3101,
    /// Employee not found
    EmployeeNotFound = 3201,
    /// Employee code or email already exists in the tenant
    EmployeeAlreadyExists = 3202,

    // ==================== 4xxx: Leave ====================
    /// Leave type not found
    LeaveTypeNotFound = 4001,
    /// Leave request not found
    LeaveRequestNotFound = 4101,
    /// End date precedes start date
    InvalidDateRange = 4102,

    // ==================== 5xxx: Attendance ====================
    /// Already clocked in today
    AlreadyClockedIn = 5001,
    /// No clock-in recorded today
    NotClockedIn = 5002,
    /// Already clocked out today
    AlreadyClockedOut = 5003,

    // ==================== 6xxx: Timesheet & billing ====================
    /// Client not found
    ClientNotFound = 6001,
    /// Project not found
    ProjectNotFound = 6101,
    /// Task not found
    TaskNotFound = 6201,
    /// Time entry not found
    TimeEntryNotFound = 6301,
    /// Time entry is submitted or approved and cannot change
    TimeEntryLocked = 6302,
    /// Hours outside the accepted range
    InvalidHours = 6303,

    // ==================== 7xxx: Notification ====================
    /// Tenant has no mail relay configured
    EmailNotConfigured = 7001,
    /// Mail relay rejected or failed the delivery
    EmailDeliveryFailed = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidDate => "Dates must use the YYYY-MM-DD format",

            // Auth
            ErrorCode::NotAuthenticated => "Not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::EmailAlreadyRegistered => "Email already registered",
            ErrorCode::ResetTokenInvalid => "Reset token is invalid or has expired",

            // Permission
            ErrorCode::PermissionDenied => "Access denied",
            ErrorCode::RoleNotAssignable => "Role cannot be assigned",

            // Tenant & organization
            ErrorCode::TenantNotFound => "Tenant not found",
            ErrorCode::DepartmentNotFound => "Department not found",
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeAlreadyExists => "Employee ID or email already exists",

            // Leave
            ErrorCode::LeaveTypeNotFound => "Leave type not found",
            ErrorCode::LeaveRequestNotFound => "Leave request not found",
            ErrorCode::InvalidDateRange => "End date must not be before start date",

            // Attendance
            ErrorCode::AlreadyClockedIn => "Already clocked in today",
            ErrorCode::NotClockedIn => "Not clocked in yet",
            ErrorCode::AlreadyClockedOut => "Already clocked out today",

            // Timesheet & billing
            ErrorCode::ClientNotFound => "Client not found",
            ErrorCode::ProjectNotFound => "Project not found",
            ErrorCode::TaskNotFound => "Task not found",
            ErrorCode::TimeEntryNotFound => "Time entry not found",
            ErrorCode::TimeEntryLocked => "Time entry can no longer be changed",
            ErrorCode::InvalidHours => "Hours must be greater than 0 and at most 24",

            // Notification
            ErrorCode::EmailNotConfigured => "Email settings are not configured",
            ErrorCode::EmailDeliveryFailed => "Email delivery failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidDate),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::UserNotFound),
            1006 => Ok(ErrorCode::AccountDisabled),
            1007 => Ok(ErrorCode::EmailAlreadyRegistered),
            1008 => Ok(ErrorCode::ResetTokenInvalid),

            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleNotAssignable),

            3001 => Ok(ErrorCode::TenantNotFound),
            3101 => Ok(ErrorCode::DepartmentNotFound),
            3201 => Ok(ErrorCode::EmployeeNotFound),
            3202 => Ok(ErrorCode::EmployeeAlreadyExists),

            4001 => Ok(ErrorCode::LeaveTypeNotFound),
            4101 => Ok(ErrorCode::LeaveRequestNotFound),
            4102 => Ok(ErrorCode::InvalidDateRange),

            5001 => Ok(ErrorCode::AlreadyClockedIn),
            5002 => Ok(ErrorCode::NotClockedIn),
            5003 => Ok(ErrorCode::AlreadyClockedOut),

            6001 => Ok(ErrorCode::ClientNotFound),
            6101 => Ok(ErrorCode::ProjectNotFound),
            6201 => Ok(ErrorCode::TaskNotFound),
            6301 => Ok(ErrorCode::TimeEntryNotFound),
            6302 => Ok(ErrorCode::TimeEntryLocked),
            6303 => Ok(ErrorCode::InvalidHours),

            7001 => Ok(ErrorCode::EmailNotConfigured),
            7002 => Ok(ErrorCode::EmailDeliveryFailed),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::InvalidRequest,
        ErrorCode::InvalidDate,
        ErrorCode::NotAuthenticated,
        ErrorCode::InvalidCredentials,
        ErrorCode::TokenExpired,
        ErrorCode::TokenInvalid,
        ErrorCode::UserNotFound,
        ErrorCode::AccountDisabled,
        ErrorCode::EmailAlreadyRegistered,
        ErrorCode::ResetTokenInvalid,
        ErrorCode::PermissionDenied,
        ErrorCode::RoleNotAssignable,
        ErrorCode::TenantNotFound,
        ErrorCode::DepartmentNotFound,
        ErrorCode::EmployeeNotFound,
        ErrorCode::EmployeeAlreadyExists,
        ErrorCode::LeaveTypeNotFound,
        ErrorCode::LeaveRequestNotFound,
        ErrorCode::InvalidDateRange,
        ErrorCode::AlreadyClockedIn,
        ErrorCode::NotClockedIn,
        ErrorCode::AlreadyClockedOut,
        ErrorCode::ClientNotFound,
        ErrorCode::ProjectNotFound,
        ErrorCode::TaskNotFound,
        ErrorCode::TimeEntryNotFound,
        ErrorCode::TimeEntryLocked,
        ErrorCode::InvalidHours,
        ErrorCode::EmailNotConfigured,
        ErrorCode::EmailDeliveryFailed,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
        ErrorCode::ConfigError,
    ];

    #[test]
    fn test_every_code_survives_u16_conversion() {
        for code in ALL {
            let raw: u16 = (*code).into();
            assert_eq!(ErrorCode::try_from(raw), Ok(*code));
        }
    }

    #[test]
    fn test_unknown_value_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::AlreadyClockedIn).unwrap();
        assert_eq!(json, "5001");
        let code: ErrorCode = serde_json::from_str("6302").unwrap();
        assert_eq!(code, ErrorCode::TimeEntryLocked);
    }

    #[test]
    fn test_messages_are_not_empty() {
        for code in ALL {
            assert!(!code.message().is_empty(), "{code:?} has no message");
        }
    }
}
