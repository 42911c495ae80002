use axum::{Json, Router, http::Uri, routing::get};
use serde::Serialize;

use super::app_error::AppError;
use super::{AppState, routes};
use crate::domain::error::DomainError;

/// Every site, account and API route plus `/healthz`, with state applied.
pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(routes::router(state.clone()))
        .fallback(unknown_route)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct Healthz {
    status: &'static str,
}

async fn healthz() -> Json<Healthz> {
    Json(Healthz { status: "ok" })
}

async fn unknown_route(uri: Uri) -> AppError {
    DomainError::NotFound(format!("route {}", uri.path())).into()
}
