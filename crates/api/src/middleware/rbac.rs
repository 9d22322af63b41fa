//! Role-based access control (RBAC) extractors.
//!
//! Each extractor resolves the [`CurrentCaller`] and runs it through the
//! access guard in `dlm_core::access`. Anonymous callers are rejected with
//! 401 Unauthorized, authenticated callers lacking the capability with 403
//! Forbidden. Place these before any body extractor so a rejected caller
//! never reaches validation or storage.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dlm_core::access::{can_read, can_write, AuthenticatedUser};

use super::auth::CurrentCaller;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a role with the basic `read` capability.
///
/// ```ignore
/// async fn list(RequireRead(user): RequireRead) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireRead(pub AuthenticatedUser);

impl FromRequestParts<AppState> for RequireRead {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentCaller(caller) = CurrentCaller::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        let user = can_read(&caller)?;
        Ok(RequireRead(user.clone()))
    }
}

/// Requires the `editor` or `administrator` role.
///
/// ```ignore
/// async fn create(RequireEditor(user): RequireEditor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireEditor(pub AuthenticatedUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentCaller(caller) = CurrentCaller::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        let user = can_write(&caller)?;
        Ok(RequireEditor(user.clone()))
    }
}
