//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// Duplicates and double clock-in/out are reported as 400, not 409;
    /// the SPA treats every 400 as a user-facing message.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::TenantNotFound
            | Self::DepartmentNotFound
            | Self::EmployeeNotFound
            | Self::LeaveTypeNotFound
            | Self::LeaveRequestNotFound
            | Self::ClientNotFound
            | Self::ProjectNotFound
            | Self::TaskNotFound
            | Self::TimeEntryNotFound => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::UserNotFound => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::RoleNotAssignable | Self::AccountDisabled => {
                StatusCode::FORBIDDEN
            }

            // 422 Unprocessable Entity
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,

            // 502 Bad Gateway (upstream mail relay)
            Self::EmailDeliveryFailed => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (conflicts and business rules)
            Self::AlreadyExists
            | Self::InvalidRequest
            | Self::InvalidDate
            | Self::EmailAlreadyRegistered
            | Self::ResetTokenInvalid
            | Self::EmployeeAlreadyExists
            | Self::InvalidDateRange
            | Self::AlreadyClockedIn
            | Self::NotClockedIn
            | Self::AlreadyClockedOut
            | Self::TimeEntryLocked
            | Self::InvalidHours
            | Self::EmailNotConfigured => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_are_unauthorized() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::TokenExpired.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::TokenInvalid.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::UserNotFound.http_status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_conflicts_are_bad_request() {
        assert_eq!(
            ErrorCode::EmailAlreadyRegistered.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::EmployeeAlreadyExists.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::AlreadyClockedIn.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::NotClockedIn.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(
            ErrorCode::LeaveRequestNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ErrorCode::ProjectNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_forbidden_and_validation() {
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ErrorCode::DatabaseError.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
