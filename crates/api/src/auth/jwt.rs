//! Access-token validation.
//!
//! Tokens are HS256-signed JWTs issued by the identity host and carry a
//! [`Claims`] payload. This service never issues tokens to clients;
//! [`generate_access_token`] exists for tooling and tests that need to act
//! as the identity host.

use dlm_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the caller's user id on the identity host.
    pub sub: DbId,
    /// Role names granted to the caller (e.g. `"editor"`, `"subscriber"`).
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for JWT validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity host.
    pub secret: String,
}

/// Lifetime of tokens produced by [`generate_access_token`].
const ACCESS_TOKEN_EXPIRY_MINS: i64 = 15;

impl JwtConfig {
    /// Load JWT configuration from the `JWT_SECRET` environment variable.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self { secret }
    }
}

/// Generate an HS256 access token for the given user and roles, valid for
/// 15 minutes.
pub fn generate_access_token(
    user_id: DbId,
    roles: &[&str],
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + ACCESS_TOKEN_EXPIRY_MINS * 60;

    let claims = Claims {
        sub: user_id,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
