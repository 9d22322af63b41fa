//! Entity models and request DTOs.

pub mod download;
pub mod version;

use validator::Validate;

use crate::error::CoreError;

/// Run the declared field validations of a request DTO, mapping any failure
/// to [`CoreError::Validation`].
pub fn validate_request<T: Validate>(request: &T) -> Result<(), CoreError> {
    request
        .validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}

pub(crate) fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut error = validator::ValidationError::new("blank");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}
