//! JWT-based caller extraction for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dlm_core::access::{AuthenticatedUser, Caller};

use crate::auth::jwt::validate_token;
use crate::state::AppState;

/// The caller behind the current request.
///
/// A missing `Authorization` header, a non-Bearer scheme, or a token that
/// fails validation all resolve to [`Caller::Anonymous`]; deciding whether
/// that is acceptable is left to the access guard.
#[derive(Debug, Clone)]
pub struct CurrentCaller(pub Caller);

impl FromRequestParts<AppState> for CurrentCaller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
        else {
            return Ok(CurrentCaller(Caller::Anonymous));
        };

        match validate_token(token, &state.config.jwt) {
            Ok(claims) => Ok(CurrentCaller(Caller::User(AuthenticatedUser {
                id: claims.sub,
                roles: claims.roles,
            }))),
            Err(err) => {
                tracing::debug!(
                    error = %err,
                    "Rejected access token, treating caller as anonymous"
                );
                Ok(CurrentCaller(Caller::Anonymous))
            }
        }
    }
}
