use anyhow::bail;
use jsonwebtoken::Algorithm;

use crate::{env_lookup, parse_var};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,
}

impl JwtConfig {
    /// Reads `JWT_SECRET`, `JWT_ALGORITHM` and `ACCESS_TOKEN_EXPIRE_MINUTES`.
    ///
    /// A missing secret falls back to a development placeholder and logs a
    /// warning. Only the HMAC algorithms are accepted since tokens are signed
    /// with a shared secret.
    ///
    /// # Errors
    ///
    /// Fails on an unknown or non-HMAC algorithm or a negative lifetime.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET is not set, using an insecure development secret");
                DEFAULT_SECRET.to_string()
            }
        };

        let algorithm = parse_var(&lookup, "JWT_ALGORITHM", Algorithm::HS256)?;
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            bail!("JWT_ALGORITHM must be one of HS256, HS384, HS512");
        }

        let access_token_expire_minutes = parse_var(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", 30)?;
        if access_token_expire_minutes < 0 {
            bail!("ACCESS_TOKEN_EXPIRE_MINUTES must not be negative");
        }

        Ok(Self {
            secret,
            algorithm,
            access_token_expire_minutes,
        })
    }
}
