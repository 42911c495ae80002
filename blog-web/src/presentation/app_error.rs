use crate::domain::error::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unauthorized")]
    Unauthorized,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::AlreadyExists(_) => (StatusCode::CONFLICT, err.to_string()),
                DomainError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::Forbidden => (StatusCode::FORBIDDEN, err.to_string()),
                DomainError::Unexpected(detail) => {
                    error!(%detail, "request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, describe(&errors)),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
        };

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

/// `field: constraint (bounds)` per failed check; the submitted value is left out.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |err| {
                let mut bounds: Vec<String> = err
                    .params
                    .iter()
                    .filter(|(key, _)| *key != "value")
                    .map(|(key, value)| format!("{key}={value}"))
                    .collect();
                bounds.sort();
                let rule = err.message.as_deref().unwrap_or(err.code.as_ref());
                if bounds.is_empty() {
                    format!("{field}: {rule}")
                } else {
                    format!("{field}: {rule} ({})", bounds.join(", "))
                }
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use validator::Validate;

    use super::{AppError, describe};
    use crate::domain::error::DomainError;

    #[derive(Validate)]
    struct Secret {
        #[validate(length(min = 8, max = 128))]
        password: String,
    }

    #[test]
    fn validation_message_names_field_and_bounds_only() {
        let errors = Secret {
            password: "hunter2".to_string(),
        }
        .validate()
        .expect_err("short password must fail");

        let message = describe(&errors);
        assert_eq!(message, "password: length (max=128, min=8)");
        assert!(!message.contains("hunter2"));
    }

    #[tokio::test]
    async fn unexpected_errors_hide_their_detail() {
        let response =
            AppError::from(DomainError::Unexpected("pool timed out".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        assert_eq!(&body[..], br#"{"error":"internal error"}"#);
    }
}
