//! Error handling
//!
//! The error model lives in `shared::error`; this module re-exports it and
//! adds the conversions that only make sense inside the server.

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::invalid(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Replace a generic `NotFound` with a resource-specific code
pub trait NotFoundAs<T> {
    fn not_found_as(self, code: ErrorCode) -> Result<T, AppError>;
}

impl<T> NotFoundAs<T> for Result<T, RepoError> {
    fn not_found_as(self, code: ErrorCode) -> Result<T, AppError> {
        self.map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(code),
            other => other.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_repo_error_mapping() {
        let err: AppError = RepoError::Duplicate("email taken".into()).into();
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);

        let err: AppError = RepoError::NotFound("x".into()).into();
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err: AppError = RepoError::Database("io".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_not_found_as() {
        let res: Result<(), RepoError> = Err(RepoError::NotFound("project".into()));
        let err = res.not_found_as(ErrorCode::ProjectNotFound).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProjectNotFound);
    }
}
