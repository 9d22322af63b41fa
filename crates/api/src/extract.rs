//! Request extractors that reject with [`AppError`] instead of Axum's
//! plain-text rejections, so every 4xx carries the JSON error body.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use dlm_core::error::CoreError;
use dlm_core::models::validate_request;
use dlm_core::types::DbId;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// A JSON body that has been deserialized and passed its declared
/// field validations.
///
/// Unparseable bodies (bad JSON, missing or mistyped fields, wrong content
/// type) reject with 400 `BAD_REQUEST`; failed validations with 400
/// `VALIDATION_ERROR`.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        validate_request(&value)?;
        Ok(ValidatedJson(value))
    }
}

/// The `{downloadId}` path segment, required to be a positive integer.
pub struct DownloadIdPath(pub DbId);

impl<S> FromRequestParts<S> for DownloadIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(download_id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        if download_id <= 0 {
            return Err(AppError::Core(CoreError::Validation(format!(
                "downloadId must be a positive integer, got {download_id}"
            ))));
        }
        Ok(DownloadIdPath(download_id))
    }
}
