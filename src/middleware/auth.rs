use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use snippets_auth::verify_token;
use snippets_core::AppError;
use snippets_models::User;
use tracing::warn;

use crate::middleware::role::ensure_admin;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;

/// The authenticated user behind the request's bearer token.
///
/// Rejects with 401 when the header is missing or malformed, the token fails
/// verification, or the user it names no longer exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// An authenticated user with `is_admin` set. Non-admins get 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Not authenticated"))?;

    match auth_header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AppError::unauthorized("Not authenticated")),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = verify_token(token, &state.jwt_config)?;
        let user_id = claims.user_id()?;

        let user = AuthService::get_user_by_id(&state.db, user_id.into())
            .await?
            .ok_or_else(|| {
                warn!(user.id = %user_id, "Token subject does not match any user");
                AppError::unauthorized("Could not validate credentials")
            })?;

        Ok(AuthUser(user))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        ensure_admin(&user)?;
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/auth/me");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_scheme_case_insensitive() {
        let parts = parts_with_auth(Some("bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_rejected() {
        let err = bearer_token(&parts_with_auth(None)).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_other_scheme_rejected() {
        assert!(bearer_token(&parts_with_auth(Some("Basic dXNlcjpwYXNz"))).is_err());
        assert!(bearer_token(&parts_with_auth(Some("Bearer"))).is_err());
        assert!(bearer_token(&parts_with_auth(Some("Bearer "))).is_err());
    }
}
