use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::pagination::{POSTS_PER_PAGE, Page, PageSelector, num_pages};
use crate::data::author_repository::AuthorRepository;
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::domain::author::Author;
use crate::domain::comment::{Comment, CommentRequest};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

#[derive(Debug, Clone)]
pub(crate) struct PostDetail {
    pub(crate) post: Post,
    pub(crate) author: Option<Author>,
    pub(crate) comments: Vec<Comment>,
}

pub(crate) struct BlogService {
    authors: Arc<dyn AuthorRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl BlogService {
    pub(crate) fn new(
        authors: Arc<dyn AuthorRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            authors,
            posts,
            comments,
        }
    }

    pub(crate) async fn list_posts(&self, selector: PageSelector) -> Result<Page<Post>, DomainError> {
        let total = self.posts.total_posts().await?;
        let num_pages = num_pages(total, POSTS_PER_PAGE);
        let number = selector.resolve(num_pages)?;

        let pagination = Pagination {
            page: number,
            page_size: POSTS_PER_PAGE,
        };
        let items = self.posts.list_posts(pagination).await?;

        Ok(Page {
            items,
            number,
            num_pages,
            per_page: POSTS_PER_PAGE,
            total,
        })
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))
    }

    pub(crate) async fn post_detail(&self, id: i64) -> Result<PostDetail, DomainError> {
        let post = self.get_post(id).await?;
        let author = match post.author_id {
            Some(author_id) => self.authors.get_author(author_id).await?,
            None => None,
        };
        let comments = self.comments.list_comments_for_post(post.id).await?;

        Ok(PostDetail {
            post,
            author,
            comments,
        })
    }

    /// Publishes a post under the caller's author profile.
    pub(crate) async fn create_post(
        &self,
        user_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        let author = self
            .authors
            .find_by_user(user_id)
            .await?
            .ok_or(DomainError::Forbidden)?;

        let new_post = NewPost {
            title: req.title,
            content: req.content,
            published_at: req.published_at.unwrap_or_else(Utc::now),
            author_id: Some(author.id),
        };
        let post = self.posts.create_post(new_post).await?;
        info!(post_id = post.id, author_id = author.id, "post created");
        Ok(post)
    }

    pub(crate) async fn update_post(
        &self,
        user_id: i64,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        let author = self.owning_author(user_id, post_id).await?;

        let patch = PostPatch {
            title: req.title,
            content: req.content,
        };
        self.posts
            .update_post_owned(post_id, author.id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    /// Deletes the post and, through storage, its comments.
    pub(crate) async fn delete_post(&self, user_id: i64, post_id: i64) -> Result<(), DomainError> {
        self.owning_author(user_id, post_id).await?;

        if !self.posts.delete_post(post_id).await? {
            return Err(DomainError::not_found("post", post_id));
        }
        info!(post_id, "post deleted");
        Ok(())
    }

    /// Binds the comment to `user_id` and `post_id`; nothing in `req` can override them.
    pub(crate) async fn create_comment(
        &self,
        user_id: i64,
        post_id: i64,
        req: CommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;
        let post = self.get_post(post_id).await?;

        let comment = self
            .comments
            .create_comment(NewComment {
                content: req.content,
                post_id: post.id,
                author_id: user_id,
            })
            .await?;
        info!(comment_id = comment.id, post_id, user_id, "comment created");
        Ok(comment)
    }

    pub(crate) async fn update_comment(
        &self,
        user_id: i64,
        comment_id: i64,
        req: CommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;
        self.owned_comment(user_id, comment_id).await?;

        self.comments
            .update_comment_owned(comment_id, user_id, req.content)
            .await?
            .ok_or_else(|| DomainError::not_found("comment", comment_id))
    }

    pub(crate) async fn delete_comment(
        &self,
        user_id: i64,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        self.owned_comment(user_id, comment_id).await?;

        if !self.comments.delete_comment(comment_id).await? {
            return Err(DomainError::not_found("comment", comment_id));
        }
        Ok(())
    }

    async fn owning_author(&self, user_id: i64, post_id: i64) -> Result<Author, DomainError> {
        let post = self.get_post(post_id).await?;
        let author = self
            .authors
            .find_by_user(user_id)
            .await?
            .ok_or(DomainError::Forbidden)?;

        if post.author_id != Some(author.id) {
            return Err(DomainError::Forbidden);
        }
        Ok(author)
    }

    async fn owned_comment(&self, user_id: i64, comment_id: i64) -> Result<Comment, DomainError> {
        let comment = self
            .comments
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("comment", comment_id))?;

        if comment.author_id != user_id {
            return Err(DomainError::Forbidden);
        }
        Ok(comment)
    }
}
