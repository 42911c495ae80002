use async_trait::async_trait;

use crate::domain::author::Author;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewAuthor {
    pub(crate) user_id: i64,
    pub(crate) bio: Option<String>,
}

#[async_trait]
pub(crate) trait AuthorRepository: Send + Sync {
    async fn create_author(&self, input: NewAuthor) -> Result<Author, DomainError>;
    async fn get_author(&self, id: i64) -> Result<Option<Author>, DomainError>;
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Author>, DomainError>;
    /// Ordered by user id.
    async fn list_authors(&self) -> Result<Vec<Author>, DomainError>;
    async fn update_author_bio(
        &self,
        id: i64,
        bio: Option<String>,
    ) -> Result<Option<Author>, DomainError>;
    /// Posts of the deleted author survive with their author cleared.
    async fn delete_author(&self, id: i64) -> Result<bool, DomainError>;
}
