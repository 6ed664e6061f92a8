//! Shared types for the HR platform
//!
//! Types used by the server and by any Rust client of its API:
//! the unified error system, the role model and the auth DTOs.

pub mod client;
pub mod error;
pub mod types;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
pub use types::Role;
