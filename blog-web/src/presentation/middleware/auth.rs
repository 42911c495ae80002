use axum::{
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use url::form_urlencoded;

use crate::domain::error::DomainError;
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;
use crate::presentation::routes::LOGIN_URL;

#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser {
    pub(crate) user_id: i64,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Guards the JSON API: a missing or bad bearer token is a 401.
pub(crate) async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, request.headers())
        .await?
        .ok_or(AppError::Unauthorized)?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Guards the site pages: anonymous callers are sent to the login page with
/// `next` pointing back at the path they asked for.
pub(crate) async fn login_required_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = match authenticate(&state, request.headers()).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    match user {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => {
            let path = match request.extensions().get::<OriginalUri>() {
                Some(OriginalUri(uri)) => uri.path().to_string(),
                None => request.uri().path().to_string(),
            };
            (
                StatusCode::FOUND,
                [(header::LOCATION, login_redirect(&path))],
            )
                .into_response()
        }
    }
}

pub(crate) fn login_redirect(next: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    format!("{LOGIN_URL}?{query}")
}

/// A valid token whose account has since been deleted counts as anonymous.
async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<AuthenticatedUser>, AppError> {
    let Some(claims) = bearer_token(headers).and_then(|token| state.jwt.verify_token(token).ok())
    else {
        return Ok(None);
    };

    match state.auth_service.current_user(claims.user_id).await {
        Ok(user) => Ok(Some(AuthenticatedUser { user_id: user.id })),
        Err(DomainError::NotFound(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = auth_header.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}
