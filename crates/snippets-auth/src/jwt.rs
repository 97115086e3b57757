//! JWT creation and verification.
//!
//! Tokens are signed with the configured HMAC algorithm and shared secret.
//! Verification pins the algorithm to the configured one and applies no
//! clock leeway, so a token stops working the second after its `exp`.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use snippets_config::JwtConfig;
use snippets_core::AppError;

use crate::claims::Claims;

/// Creates an access token valid for the configured number of minutes.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_access_token_with_ttl(
        user_id,
        Duration::minutes(jwt_config.access_token_expire_minutes),
        jwt_config,
    )
}

/// Creates an access token that expires `ttl` after now.
///
/// # Arguments
///
/// * `user_id` - The user's UUID, stored as the `sub` claim
/// * `ttl` - Token lifetime; zero yields a token that expires this second
/// * `jwt_config` - Secret and algorithm used for signing
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token_with_ttl(
    user_id: Uuid,
    ttl: Duration,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = now + ttl;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: exp.timestamp().max(0) as usize,
    };

    encode(
        &Header::new(jwt_config.algorithm),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error if:
/// - The token signature is invalid
/// - The token was signed with a different algorithm
/// - The token has expired
/// - The token is malformed or its subject is not a UUID
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(jwt_config.algorithm);
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Could not validate credentials"))?;

    claims.user_id()?;

    Ok(claims)
}
