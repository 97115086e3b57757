//! Extractors that deserialize and then validate request input.
//!
//! A body or query string that cannot be parsed is a `400 Bad Request`. Input
//! that parses but breaks a field rule (length, range, email format, allowed
//! enum value) is a `422 Unprocessable Entity`.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use snippets_core::AppError;
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>();
    messages.sort();
    messages.join(", ")
}

fn validation_error(errors: ValidationErrors) -> AppError {
    AppError::new(
        StatusCode::UNPROCESSABLE_ENTITY,
        anyhow!("{}", format_errors(&errors)),
    )
}

/// Pulls the offending value out of a serde "unknown variant" message.
fn unknown_variant(error_msg: &str) -> Option<String> {
    error_msg
        .split("unknown variant `")
        .nth(1)
        .and_then(|s| s.split('`').next())
        .map(str::to_string)
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::new(StatusCode::BAD_REQUEST, anyhow!("{} is required", field));
    }

    if let Some(value) = unknown_variant(&error_msg) {
        return AppError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            anyhow!("'{}' is not an allowed value", value),
        );
    }

    if error_msg.contains("invalid type") {
        return AppError::new(
            StatusCode::BAD_REQUEST,
            anyhow!("Invalid field type in request"),
        );
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::new(
            StatusCode::BAD_REQUEST,
            anyhow!("Missing 'Content-Type: application/json' header"),
        );
    }

    AppError::new(StatusCode::BAD_REQUEST, anyhow!("Invalid request body"))
}

fn query_rejection_to_error(rejection: QueryRejection) -> AppError {
    let error_msg = rejection.body_text();

    if let Some(value) = unknown_variant(&error_msg) {
        return AppError::new(
            StatusCode::BAD_REQUEST,
            anyhow!("'{}' is not an allowed value", value),
        );
    }

    AppError::new(
        StatusCode::BAD_REQUEST,
        anyhow!("Invalid query parameters"),
    )
}

#[derive(Debug, Clone, Copy, Default)]
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
            .map_err(json_rejection_to_error)?;

        value.validate().map_err(validation_error)?;

        Ok(ValidatedJson(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection_to_error)?;

        value.validate().map_err(validation_error)?;

        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_unknown_variant_extraction() {
        let msg = "Failed to deserialize the JSON body into the target type: file_type: unknown variant `docx`, expected one of `pdf`, `image` at line 1 column 20";
        assert_eq!(unknown_variant(msg).as_deref(), Some("docx"));
        assert_eq!(unknown_variant("missing field `title`"), None);
    }

    #[test]
    fn test_format_errors_uses_messages() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "limit",
            ValidationError::new("range").with_message("limit must be between 1 and 50".into()),
        );
        errors.add("title", ValidationError::new("length"));

        assert_eq!(
            format_errors(&errors),
            "limit must be between 1 and 50, title is invalid"
        );
    }
}
