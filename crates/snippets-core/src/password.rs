//! Password hashing and verification.
//!
//! Passwords are hashed with Argon2id using the crate's default parameters and
//! a fresh random salt per hash. The result is a PHC string
//! (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`), so verification reads
//! the algorithm, parameters and salt back out of the stored value.
//!
//! Input is truncated to [`MAX_PASSWORD_BYTES`] before hashing and before
//! verifying. Two passwords that share their first 72 bytes are therefore
//! indistinguishable.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};

use crate::errors::AppError;

/// Number of password bytes that take part in hashing.
pub const MAX_PASSWORD_BYTES: usize = 72;

fn truncated(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}

/// Hashes a password into a self-describing PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    Argon2::default()
        .hash_password(truncated(password), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Checks a password against a stored hash.
///
/// Returns `Ok(false)` on a mismatch and an internal error when the stored
/// hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))?;

    match Argon2::default().verify_password(truncated(password), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::internal_error(format!(
            "Failed to verify password: {}",
            e
        ))),
    }
}
