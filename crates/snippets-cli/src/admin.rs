//! Admin account management.

use snippets_core::hash_password;
use snippets_models::{RegisterRequestDto, UserId};
use sqlx::PgPool;
use validator::Validate;

/// Details for a new admin account.
pub struct NewAdmin {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub university: Option<String>,
}

impl NewAdmin {
    /// Applies the rules self-registration enforces over HTTP.
    pub fn validate(&self) -> anyhow::Result<()> {
        let as_registration = RegisterRequestDto {
            email: self.email.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            university: self.university.clone(),
        };

        as_registration
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid admin details: {}", e))
    }
}

/// Inserts a user with `is_admin = true`.
///
/// Fails when the details break the registration rules or the email is
/// already registered.
pub async fn create_admin(db: &PgPool, admin: &NewAdmin) -> anyhow::Result<UserId> {
    admin.validate()?;

    let hashed_password = hash_password(&admin.password)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e.message()))?;

    let user_id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (email, hashed_password, first_name, last_name, university, is_admin)
         VALUES ($1, $2, $3, $4, $5, TRUE)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(&admin.email)
    .bind(&hashed_password)
    .bind(&admin.first_name)
    .bind(&admin.last_name)
    .bind(&admin.university)
    .fetch_optional(db)
    .await?;

    user_id.ok_or_else(|| anyhow::anyhow!("User with this email already exists"))
}

/// Sets the admin flag of an existing user.
///
/// Fails when no user has the given email.
pub async fn set_admin(db: &PgPool, email: &str, is_admin: bool) -> anyhow::Result<()> {
    let result = sqlx::query("UPDATE users SET is_admin = $1, updated_at = NOW() WHERE email = $2")
        .bind(is_admin)
        .bind(email)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        anyhow::bail!("No user found with email {}", email);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_admin() -> NewAdmin {
        NewAdmin {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@uni.edu".to_string(),
            password: "password123".to_string(),
            university: None,
        }
    }

    #[test]
    fn test_valid_admin() {
        assert!(new_admin().validate().is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let admin = NewAdmin {
            password: "abc".to_string(),
            ..new_admin()
        };
        let err = admin.validate().unwrap_err().to_string();
        assert!(err.contains("password must be at least 8 characters"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let admin = NewAdmin {
            email: "not-an-email".to_string(),
            ..new_admin()
        };
        let err = admin.validate().unwrap_err().to_string();
        assert!(err.contains("email must be a valid email address"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let admin = NewAdmin {
            first_name: String::new(),
            ..new_admin()
        };
        assert!(admin.validate().is_err());
    }
}
