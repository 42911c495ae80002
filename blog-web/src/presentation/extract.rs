use axum::extract::{FromRequestParts, rejection::PathRejection};
use tracing::debug;

use crate::domain::error::DomainError;
use crate::presentation::app_error::AppError;

/// Path parameters that fail to parse name no resource, so they answer 404.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub(crate) struct Path<T>(pub(crate) T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                debug!(reason = %err.body_text(), "unparsable path parameter");
                AppError::Domain(DomainError::NotFound("resource".to_string()))
            }
            other => AppError::Domain(DomainError::Unexpected(other.body_text())),
        }
    }
}
