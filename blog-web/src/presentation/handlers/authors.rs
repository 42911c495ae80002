use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::author_service::AuthorDetail;
use crate::domain::author::{Author, AuthorProfileRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::Path;
use crate::presentation::handlers::posts::PostDto;
use crate::presentation::middleware::auth::AuthenticatedUser;

/// The bio is trimmed before its length is checked; a blank bio clears it.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct AuthorProfileDto {
    #[schema(max_length = 500)]
    pub(crate) bio: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthorDto {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) full_name: String,
    pub(crate) bio: Option<String>,
    pub(crate) url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthorDetailDto {
    pub(crate) author: AuthorDto,
    pub(crate) posts: Vec<PostDto>,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            full_name: author.full_name(),
            url: author.absolute_url(),
            id: author.id,
            user_id: author.user.id,
            username: author.user.username,
            bio: author.bio,
        }
    }
}

impl From<AuthorDetail> for AuthorDetailDto {
    fn from(detail: AuthorDetail) -> Self {
        Self {
            author: detail.author.into(),
            posts: detail.posts.into_iter().map(PostDto::from).collect(),
        }
    }
}

impl From<AuthorProfileDto> for AuthorProfileRequest {
    fn from(dto: AuthorProfileDto) -> Self {
        Self { bio: dto.bio }
    }
}

#[utoipa::path(
    get,
    path = "/authors/",
    tag = "authors",
    responses(
        (status = 200, description = "All authors", body = [AuthorDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_authors(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<AuthorDto>>)> {
    let authors = state.author_service.list_authors().await?;

    Ok((
        StatusCode::OK,
        Json(authors.into_iter().map(AuthorDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/author/{id}",
    tag = "authors",
    params(
        ("id" = i64, Path, description = "Author id")
    ),
    responses(
        (status = 200, description = "Author with their posts", body = AuthorDetailDto),
        (status = 404, description = "Author not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<AuthorDetailDto>)> {
    let detail = state.author_service.author_detail(id).await?;

    Ok((StatusCode::OK, Json(AuthorDetailDto::from(detail))))
}

#[utoipa::path(
    post,
    path = "/api/authors",
    tag = "authors",
    security(
        ("bearer_auth" = [])
    ),
    request_body = AuthorProfileDto,
    responses(
        (status = 201, description = "Author profile created", body = AuthorDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Profile already exists"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_author_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<AuthorProfileDto>,
) -> AppResult<(StatusCode, Json<AuthorDto>)> {
    let author = state
        .author_service
        .create_profile(auth.user_id, dto.into())
        .await?;
    Ok((StatusCode::CREATED, Json(AuthorDto::from(author))))
}

#[utoipa::path(
    put,
    path = "/api/authors/me",
    tag = "authors",
    security(
        ("bearer_auth" = [])
    ),
    request_body = AuthorProfileDto,
    responses(
        (status = 200, description = "Author profile updated", body = AuthorDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Caller has no author profile"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_author_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<AuthorProfileDto>,
) -> AppResult<(StatusCode, Json<AuthorDto>)> {
    let author = state
        .author_service
        .update_profile(auth.user_id, dto.into())
        .await?;
    Ok((StatusCode::OK, Json(AuthorDto::from(author))))
}

#[utoipa::path(
    delete,
    path = "/api/authors/me",
    tag = "authors",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Profile deleted; its posts remain without an author"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Caller has no author profile"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_author_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<StatusCode> {
    state.author_service.delete_profile(auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
