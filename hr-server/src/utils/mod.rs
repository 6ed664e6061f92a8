//! Utilities - error re-exports, logging, dates and validation

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode, NotFoundAs};
pub use validation::ValidatedJson;
