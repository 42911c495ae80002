use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::blog_service::PostDetail;
use crate::application::pagination::{Page, PageSelector};
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::Path;
use crate::presentation::handlers::authors::AuthorDto;
use crate::presentation::handlers::comments::CommentDto;
use crate::presentation::middleware::auth::AuthenticatedUser;

/// Title and content lengths are checked after trimming, by the domain request.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreatePostDto {
    #[schema(min_length = 1, max_length = 200)]
    pub(crate) title: String,
    #[schema(min_length = 1, max_length = 4000)]
    pub(crate) content: String,
    /// Defaults to the time of the request.
    pub(crate) published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdatePostDto {
    #[schema(min_length = 1, max_length = 200)]
    pub(crate) title: String,
    #[schema(min_length = 1, max_length = 4000)]
    pub(crate) content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostListQuery {
    pub(crate) page: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) published_at: DateTime<Utc>,
    pub(crate) author_id: Option<i64>,
    pub(crate) url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PageDto {
    pub(crate) number: u32,
    pub(crate) num_pages: u32,
    pub(crate) count: i64,
    pub(crate) per_page: u32,
    pub(crate) has_next: bool,
    pub(crate) has_previous: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostListDto {
    pub(crate) post_list: Vec<PostDto>,
    pub(crate) is_paginated: bool,
    pub(crate) page_obj: PageDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDetailDto {
    pub(crate) post: PostDto,
    pub(crate) author: Option<AuthorDto>,
    pub(crate) comments: Vec<CommentDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            url: post.absolute_url(),
            id: post.id,
            title: post.title,
            content: post.content,
            published_at: post.published_at,
            author_id: post.author_id,
        }
    }
}

impl From<Page<Post>> for PostListDto {
    fn from(page: Page<Post>) -> Self {
        let page_obj = PageDto {
            number: page.number,
            num_pages: page.num_pages,
            count: page.total,
            per_page: page.per_page,
            has_next: page.has_next(),
            has_previous: page.has_previous(),
        };
        Self {
            is_paginated: page.is_paginated(),
            post_list: page.items.into_iter().map(PostDto::from).collect(),
            page_obj,
        }
    }
}

impl From<PostDetail> for PostDetailDto {
    fn from(detail: PostDetail) -> Self {
        Self {
            post: detail.post.into(),
            author: detail.author.map(AuthorDto::from),
            comments: detail.comments.into_iter().map(CommentDto::from).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "posts",
    params(
        ("page" = Option<String>, Query, description = "Page number (1-based) or `last`")
    ),
    responses(
        (status = 200, description = "Posts listed, newest first, 5 per page", body = PostListDto),
        (status = 404, description = "Page out of range"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> AppResult<(StatusCode, Json<PostListDto>)> {
    let selector = match query.page.as_deref().filter(|raw| !raw.is_empty()) {
        Some(raw) => raw.parse::<PageSelector>()?,
        None => PageSelector::default(),
    };

    let page = state.blog_service.list_posts(selector).await?;

    Ok((StatusCode::OK, Json(PostListDto::from(page))))
}

#[utoipa::path(
    get,
    path = "/post/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post with its author and comments", body = PostDetailDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<PostDetailDto>)> {
    let detail = state.blog_service.post_detail(id).await?;

    Ok((StatusCode::OK, Json(PostDetailDto::from(detail))))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller has no author profile"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let req = CreatePostRequest {
        title: dto.title,
        content: dto.content,
        published_at: dto.published_at,
    };

    let result = state.blog_service.create_post(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(result))))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let req = UpdatePostRequest {
        title: dto.title,
        content: dto.content,
    };

    let result = state
        .blog_service
        .update_post(auth.user_id, id, req)
        .await?;
    Ok((StatusCode::OK, Json(PostDto::from(result))))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post and its comments deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.blog_service.delete_post(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
