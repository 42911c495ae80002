use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::comment::{COMMENT_MAX_CHARS, Comment, CommentRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::Path;
use crate::presentation::handlers::posts::PostDto;
use crate::presentation::middleware::auth::AuthenticatedUser;

/// Only `content` is read; any post or author fields in the body are ignored.
/// Its length is checked after trimming, by the domain request.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CommentInputDto {
    #[schema(min_length = 1, max_length = 500)]
    pub(crate) content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) published_at: DateTime<Utc>,
    pub(crate) post_id: i64,
    pub(crate) author_id: i64,
    pub(crate) url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FormFieldDto {
    pub(crate) name: String,
    pub(crate) required: bool,
    pub(crate) max_length: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentFormDto {
    pub(crate) post: PostDto,
    pub(crate) fields: Vec<FormFieldDto>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            url: comment.absolute_url(),
            id: comment.id,
            content: comment.content,
            published_at: comment.published_at,
            post_id: comment.post_id,
            author_id: comment.author_id,
        }
    }
}

impl From<CommentInputDto> for CommentRequest {
    fn from(dto: CommentInputDto) -> Self {
        Self {
            content: dto.content,
        }
    }
}

#[utoipa::path(
    get,
    path = "/post/{id}/create-comment",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Comment form for the post", body = CommentFormDto),
        (status = 302, description = "Not logged in; redirected to the login page"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn comment_form(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Path(post_id): Path<i64>,
) -> AppResult<(StatusCode, Json<CommentFormDto>)> {
    let post = state.blog_service.get_post(post_id).await?;

    Ok((
        StatusCode::OK,
        Json(CommentFormDto {
            post: post.into(),
            fields: vec![FormFieldDto {
                name: "content".to_string(),
                required: true,
                max_length: COMMENT_MAX_CHARS,
            }],
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/post/{id}/create-comment",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = CommentInputDto,
    responses(
        (status = 201, description = "Comment created; Location points at the post", body = CommentDto),
        (status = 302, description = "Not logged in; redirected to the login page"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(post_id): Path<i64>,
    Json(dto): Json<CommentInputDto>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<CommentDto>)> {
    let comment = state
        .blog_service
        .create_comment(auth.user_id, post_id, dto.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, comment.absolute_url())],
        Json(CommentDto::from(comment)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Comment id")
    ),
    request_body = CommentInputDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<CommentInputDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    let comment = state
        .blog_service
        .update_comment(auth.user_id, id, dto.into())
        .await?;
    Ok((StatusCode::OK, Json(CommentDto::from(comment))))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.blog_service.delete_comment(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
