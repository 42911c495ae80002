use axum::Router;

use super::AppState;

pub(crate) mod accounts;
pub(crate) mod api;
pub(crate) mod site;

/// Where anonymous visitors of login-only pages are sent.
pub(crate) const LOGIN_URL: &str = "/accounts/login";

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(site::router(state.clone()))
        .nest("/accounts", accounts::router(state.clone()))
        .nest("/api", api::router(state))
}
