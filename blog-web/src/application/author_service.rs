use std::sync::Arc;

use tracing::info;

use crate::data::author_repository::{AuthorRepository, NewAuthor};
use crate::data::post_repository::PostRepository;
use crate::domain::author::{Author, AuthorProfileRequest};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct AuthorDetail {
    pub(crate) author: Author,
    pub(crate) posts: Vec<Post>,
}

pub(crate) struct AuthorService {
    authors: Arc<dyn AuthorRepository>,
    posts: Arc<dyn PostRepository>,
}

impl AuthorService {
    pub(crate) fn new(authors: Arc<dyn AuthorRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { authors, posts }
    }

    pub(crate) async fn list_authors(&self) -> Result<Vec<Author>, DomainError> {
        self.authors.list_authors().await
    }

    pub(crate) async fn author_detail(&self, id: i64) -> Result<AuthorDetail, DomainError> {
        let author = self
            .authors
            .get_author(id)
            .await?
            .ok_or_else(|| DomainError::not_found("author", id))?;
        let posts = self.posts.list_posts_by_author(author.id).await?;
        Ok(AuthorDetail { author, posts })
    }

    pub(crate) async fn create_profile(
        &self,
        user_id: i64,
        req: AuthorProfileRequest,
    ) -> Result<Author, DomainError> {
        let req = req.validate()?;
        let author = self
            .authors
            .create_author(NewAuthor {
                user_id,
                bio: req.bio,
            })
            .await?;
        info!(author_id = author.id, user_id, "author profile created");
        Ok(author)
    }

    pub(crate) async fn update_profile(
        &self,
        user_id: i64,
        req: AuthorProfileRequest,
    ) -> Result<Author, DomainError> {
        let req = req.validate()?;
        let author = self.own_profile(user_id).await?;
        self.authors
            .update_author_bio(author.id, req.bio)
            .await?
            .ok_or_else(|| DomainError::not_found("author", author.id))
    }

    /// The profile's posts stay published without an author.
    pub(crate) async fn delete_profile(&self, user_id: i64) -> Result<(), DomainError> {
        let author = self.own_profile(user_id).await?;
        if !self.authors.delete_author(author.id).await? {
            return Err(DomainError::not_found("author", author.id));
        }
        info!(author_id = author.id, user_id, "author profile deleted");
        Ok(())
    }

    async fn own_profile(&self, user_id: i64) -> Result<Author, DomainError> {
        self.authors
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("author profile".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::AuthorService;
    use crate::data::post_repository::NewPost;
    use crate::data::repositories::Repositories;
    use crate::data::user_repository::NewUser;
    use crate::domain::author::AuthorProfileRequest;
    use crate::domain::error::DomainError;

    async fn user(repos: &Repositories, username: &str, first: &str, last: &str) -> i64 {
        repos
            .users
            .create_user(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                first_name: first.to_string(),
                last_name: last.to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .expect("user must be created")
            .id
    }

    fn service(repos: &Repositories) -> AuthorService {
        AuthorService::new(repos.authors.clone(), repos.posts.clone())
    }

    #[tokio::test]
    async fn profile_lifecycle() {
        let repos = Repositories::memory();
        let service = service(&repos);
        let user_id = user(&repos, "john", "John", "Wick").await;

        let author = service
            .create_profile(
                user_id,
                AuthorProfileRequest {
                    bio: Some("This is me, from the movies.".to_string()),
                },
            )
            .await
            .expect("profile must be created");
        assert_eq!(author.to_string(), "John Wick");

        let err = service
            .create_profile(user_id, AuthorProfileRequest::default())
            .await
            .expect_err("second profile must fail");
        assert!(matches!(err, DomainError::AlreadyExists(_)));

        let updated = service
            .update_profile(
                user_id,
                AuthorProfileRequest {
                    bio: Some("Retired.".to_string()),
                },
            )
            .await
            .expect("profile must be updated");
        assert_eq!(updated.bio.as_deref(), Some("Retired."));
    }

    #[tokio::test]
    async fn deleting_profile_keeps_posts_without_author() {
        let repos = Repositories::memory();
        let service = service(&repos);
        let user_id = user(&repos, "john", "John", "Wick").await;
        let author = service
            .create_profile(user_id, AuthorProfileRequest::default())
            .await
            .expect("profile");
        let post = repos
            .posts
            .create_post(NewPost {
                title: "kept".to_string(),
                content: "body".to_string(),
                published_at: Utc::now(),
                author_id: Some(author.id),
            })
            .await
            .expect("post");

        let detail = service.author_detail(author.id).await.expect("detail");
        assert_eq!(detail.posts.len(), 1);

        service.delete_profile(user_id).await.expect("delete");

        let post = repos
            .posts
            .get_post(post.id)
            .await
            .expect("query")
            .expect("post survives");
        assert!(post.author_id.is_none());
        let err = service
            .author_detail(author.id)
            .await
            .expect_err("author is gone");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn authors_are_listed_by_user() {
        let repos = Repositories::memory();
        let service = service(&repos);
        let first = user(&repos, "alice", "Alice", "Liddell").await;
        let second = user(&repos, "bob", "Bob", "Dylan").await;
        service
            .create_profile(second, AuthorProfileRequest::default())
            .await
            .expect("profile");
        service
            .create_profile(first, AuthorProfileRequest::default())
            .await
            .expect("profile");

        let names: Vec<String> = service
            .list_authors()
            .await
            .expect("list")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, ["Alice Liddell", "Bob Dylan"]);
    }
}
