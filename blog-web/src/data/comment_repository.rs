use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) content: String,
    pub(crate) post_id: i64,
    pub(crate) author_id: i64,
}

#[async_trait]
pub(crate) trait CommentRepository: Send + Sync {
    /// `published_at` is assigned by storage.
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError>;
    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError>;
    /// Rewrites the content only; `published_at` stays as created.
    async fn update_comment_owned(
        &self,
        comment_id: i64,
        owner_user_id: i64,
        content: String,
    ) -> Result<Option<Comment>, DomainError>;
    async fn delete_comment(&self, id: i64) -> Result<bool, DomainError>;
    /// Oldest first.
    async fn list_comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
}
