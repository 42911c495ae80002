use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::auth_service::AuthResult;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::comments::FormFieldDto;
use crate::presentation::middleware::auth::AuthenticatedUser;

/// Username, email and names are trimmed and checked by the domain request;
/// the password is taken verbatim.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[schema(min_length = 3, max_length = 64)]
    pub(crate) username: String,
    pub(crate) email: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
    #[schema(max_length = 150)]
    pub(crate) first_name: Option<String>,
    #[schema(max_length = 150)]
    pub(crate) last_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoginDto {
    #[schema(min_length = 1, max_length = 64)]
    pub(crate) username: String,
    #[schema(min_length = 1)]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginQuery {
    pub(crate) next: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LoginFormDto {
    pub(crate) next: Option<String>,
    pub(crate) fields: Vec<FormFieldDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthResponseDto {
    pub(crate) access_token: String,
    pub(crate) user: UserDto,
    /// Where the client should go next; always a local path.
    pub(crate) redirect_to: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

impl AuthResponseDto {
    fn new(result: AuthResult, redirect_to: String) -> Self {
        Self {
            access_token: result.access_token,
            user: result.user.into(),
            redirect_to,
        }
    }
}

/// Keeps `next` only when it stays on this site.
pub(crate) fn safe_redirect(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/accounts/login",
    tag = "accounts",
    params(
        ("next" = Option<String>, Query, description = "Path to return to after login")
    ),
    responses(
        (status = 200, description = "Login form", body = LoginFormDto)
    )
)]
pub(crate) async fn login_form(Query(query): Query<LoginQuery>) -> Json<LoginFormDto> {
    Json(LoginFormDto {
        next: query.next,
        fields: vec![
            FormFieldDto {
                name: "username".to_string(),
                required: true,
                max_length: 64,
            },
            FormFieldDto {
                name: "password".to_string(),
                required: true,
                max_length: 128,
            },
        ],
    })
}

#[utoipa::path(
    post,
    path = "/accounts/login",
    tag = "accounts",
    params(
        ("next" = Option<String>, Query, description = "Path to return to after login")
    ),
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = AuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
    Json(dto): Json<LoginDto>,
) -> AppResult<(StatusCode, Json<AuthResponseDto>)> {
    let req = LoginRequest {
        username: dto.username,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;
    let redirect_to = safe_redirect(query.next.as_deref());

    Ok((
        StatusCode::OK,
        Json(AuthResponseDto::new(result, redirect_to)),
    ))
}

#[utoipa::path(
    post,
    path = "/accounts/register",
    tag = "accounts",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered successfully", body = AuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already exists"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterDto>,
) -> AppResult<(StatusCode, Json<AuthResponseDto>)> {
    dto.validate()?;

    let req = RegisterRequest {
        username: dto.username,
        email: dto.email,
        password: dto.password,
        first_name: dto.first_name.unwrap_or_default(),
        last_name: dto.last_name.unwrap_or_default(),
    };

    let result = state.auth_service.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponseDto::new(result, "/".to_string())),
    ))
}

#[utoipa::path(
    get,
    path = "/accounts/me",
    tag = "accounts",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn me(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.auth_service.current_user(auth.user_id).await?;
    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

#[utoipa::path(
    delete,
    path = "/accounts/me",
    tag = "accounts",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Account, author profile and comments deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_me(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<StatusCode> {
    state.auth_service.delete_account(auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
