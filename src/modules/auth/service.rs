use snippets_auth::create_access_token;
use snippets_config::JwtConfig;
use snippets_core::{AppError, hash_password, verify_password};
use snippets_models::UserId;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use crate::metrics;

use super::model::{LoginRequest, RegisterRequestDto, TokenResponse, User};

pub const USER_COLUMNS: &str =
    "id, email, first_name, last_name, university, is_admin, created_at, updated_at";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(user.email = %dto.email, db.operation = "INSERT", db.table = "users"))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        let email_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&dto.email)
                .fetch_one(db)
                .await?;

        if email_taken {
            warn!(user.email = %dto.email, "Registration with an existing email");
            return Err(AppError::conflict("Email already registered"));
        }

        let hashed_password = hash_password(&dto.password)?;

        // The unique index still decides when two registrations race
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, hashed_password, first_name, last_name, university)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.university)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(user.email = %dto.email, "Concurrent registration lost the race");
                return AppError::conflict("Email already registered");
            }
            AppError::from(e)
        })?;

        metrics::track_user_registered();
        info!(user.id = %user.id, "User registered");

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct Credentials {
            id: UserId,
            hashed_password: String,
        }

        let credentials = sqlx::query_as::<_, Credentials>(
            "SELECT id, hashed_password FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?;

        let Some(credentials) = credentials else {
            warn!(user.email = %dto.email, "Login failed: unknown email");
            metrics::track_user_login_failure("unknown_email");
            return Err(AppError::unauthorized("Incorrect email or password"));
        };

        if !verify_password(&dto.password, &credentials.hashed_password)? {
            warn!(user.id = %credentials.id, "Login failed: wrong password");
            metrics::track_user_login_failure("wrong_password");
            return Err(AppError::unauthorized("Incorrect email or password"));
        }

        let access_token = create_access_token(credentials.id.into(), jwt_config)?;

        metrics::track_user_login_success();
        metrics::track_jwt_issued();
        info!(user.id = %credentials.id, "User logged in");

        Ok(TokenResponse::bearer(access_token))
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user_by_id(db: &PgPool, user_id: UserId) -> Result<Option<User>, AppError> {
        debug!("Loading user");

        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(user_id)
                .fetch_optional(db)
                .await?;

        Ok(user)
    }
}
