//! Input validation
//!
//! [`ValidatedJson`] parses a JSON body and runs its `validator` rules;
//! every failure becomes a 422 in the unified error envelope.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::utils::AppError;

pub const MAX_NAME_LEN: u64 = 200;
pub const MAX_NOTE_LEN: u64 = 1000;
pub const MIN_PASSWORD_LEN: u64 = 6;

/// JSON body extractor with validation
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        value.validate().map_err(validation_error)?;
        Ok(ValidatedJson(value))
    }
}

/// Flatten `validator` errors into one message plus per-field details
pub fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect();
    fields.sort();
    let mut err = AppError::validation(format!("Invalid fields: {}", fields.join(", ")));
    for (field, errs) in errors.field_errors() {
        let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
        err = err.with_detail(field.to_string(), codes.join(","));
    }
    err
}
