//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Tenant and organization errors (3xxx)
    Organization,
    /// Leave errors (4xxx)
    Leave,
    /// Attendance errors (5xxx)
    Attendance,
    /// Timesheet and billing errors (6xxx)
    Timesheet,
    /// Notification errors (7xxx)
    Notification,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Organization,
            4000..5000 => Self::Leave,
            5000..6000 => Self::Attendance,
            6000..7000 => Self::Timesheet,
            7000..8000 => Self::Notification,
            _ => Self::System,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Organization => "organization",
            Self::Leave => "leave",
            Self::Attendance => "attendance",
            Self::Timesheet => "timesheet",
            Self::Notification => "notification",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3201), ErrorCategory::Organization);
        assert_eq!(ErrorCategory::from_code(4101), ErrorCategory::Leave);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Attendance);
        assert_eq!(ErrorCategory::from_code(6302), ErrorCategory::Timesheet);
        assert_eq!(ErrorCategory::from_code(7002), ErrorCategory::Notification);
        assert_eq!(ErrorCategory::from_code(9002), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(12000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::NotClockedIn.category(), ErrorCategory::Attendance);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
        assert_eq!(ErrorCategory::Timesheet.name(), "timesheet");
    }
}
