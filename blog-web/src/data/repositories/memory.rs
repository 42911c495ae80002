//! In-memory storage backend used when no database is configured and by the HTTP tests.
//!
//! Mirrors the PostgreSQL schema: unique usernames, emails and author-per-user,
//! foreign keys checked on insert, and the same cascade / set-null rules on delete.
//! Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::data::author_repository::{AuthorRepository, NewAuthor};
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::author::Author;
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::user::User;

#[derive(Debug, Clone)]
struct AuthorRecord {
    user_id: i64,
    bio: Option<String>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, UserCredentials>,
    authors: BTreeMap<i64, AuthorRecord>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    last_user_id: i64,
    last_author_id: i64,
    last_post_id: i64,
    last_comment_id: i64,
}

impl Tables {
    fn author(&self, id: i64) -> Result<Option<Author>, DomainError> {
        let Some(record) = self.authors.get(&id) else {
            return Ok(None);
        };
        let creds = self
            .users
            .get(&record.user_id)
            .ok_or_else(|| DomainError::Unexpected(format!("author {id} has no user")))?;
        Author::new(id, creds.user.clone(), record.bio.clone())
            .map(Some)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    fn remove_author(&mut self, id: i64) -> bool {
        if self.authors.remove(&id).is_none() {
            return false;
        }
        for post in self.posts.values_mut() {
            if post.author_id == Some(id) {
                post.author_id = None;
            }
        }
        true
    }
}

fn newest_first(a: &Post, b: &Post) -> std::cmp::Ordering {
    b.published_at
        .cmp(&a.published_at)
        .then_with(|| b.id.cmp(&a.id))
}

pub(crate) struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|creds| creds.user.username == input.username)
        {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        if tables
            .users
            .values()
            .any(|creds| creds.user.email == input.email)
        {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }

        let id = tables.last_user_id + 1;
        let user = User::new(
            id,
            input.username,
            input.email,
            input.first_name,
            input.last_name,
            Utc::now(),
        )?;
        tables.last_user_id = id;
        tables.users.insert(
            id,
            UserCredentials {
                user: user.clone(),
                password_hash: input.password_hash,
            },
        );
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|creds| creds.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|creds| creds.user.username == username)
            .cloned())
    }

    async fn delete_user(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }

        let author_ids: Vec<i64> = tables
            .authors
            .iter()
            .filter(|(_, record)| record.user_id == id)
            .map(|(author_id, _)| *author_id)
            .collect();
        for author_id in author_ids {
            tables.remove_author(author_id);
        }
        tables.comments.retain(|_, comment| comment.author_id != id);
        Ok(true)
    }
}

#[async_trait]
impl AuthorRepository for MemoryStore {
    async fn create_author(&self, input: NewAuthor) -> Result<Author, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&input.user_id) {
            return Err(DomainError::NotFound("user".to_string()));
        }
        if tables
            .authors
            .values()
            .any(|record| record.user_id == input.user_id)
        {
            return Err(DomainError::AlreadyExists("author".to_string()));
        }

        let id = tables.last_author_id + 1;
        tables.last_author_id = id;
        tables.authors.insert(
            id,
            AuthorRecord {
                user_id: input.user_id,
                bio: input.bio,
            },
        );
        tables
            .author(id)?
            .ok_or_else(|| DomainError::Unexpected(format!("author {id} vanished")))
    }

    async fn get_author(&self, id: i64) -> Result<Option<Author>, DomainError> {
        self.tables.read().await.author(id)
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<Author>, DomainError> {
        let tables = self.tables.read().await;
        let id = tables
            .authors
            .iter()
            .find(|(_, record)| record.user_id == user_id)
            .map(|(id, _)| *id);
        match id {
            Some(id) => tables.author(id),
            None => Ok(None),
        }
    }

    async fn list_authors(&self) -> Result<Vec<Author>, DomainError> {
        let tables = self.tables.read().await;
        let mut ids: Vec<(i64, i64)> = tables
            .authors
            .iter()
            .map(|(id, record)| (record.user_id, *id))
            .collect();
        ids.sort_unstable();

        let mut authors = Vec::with_capacity(ids.len());
        for (_, id) in ids {
            authors.extend(tables.author(id)?);
        }
        Ok(authors)
    }

    async fn update_author_bio(
        &self,
        id: i64,
        bio: Option<String>,
    ) -> Result<Option<Author>, DomainError> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables.authors.get_mut(&id) else {
            return Ok(None);
        };
        record.bio = bio;
        tables.author(id)
    }

    async fn delete_author(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.tables.write().await.remove_author(id))
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut tables = self.tables.write().await;
        if let Some(author_id) = input.author_id
            && !tables.authors.contains_key(&author_id)
        {
            return Err(DomainError::NotFound("author".to_string()));
        }

        let id = tables.last_post_id + 1;
        let post = Post::new(
            id,
            input.title,
            input.content,
            input.published_at,
            input.author_id,
        )?;
        tables.last_post_id = id;
        tables.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_author_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let mut tables = self.tables.write().await;
        let Some(post) = tables
            .posts
            .get_mut(&post_id)
            .filter(|post| post.author_id == Some(owner_author_id))
        else {
            return Ok(None);
        };
        post.title = patch.title;
        post.content = patch.content;
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.posts.remove(&id).is_none() {
            return Ok(false);
        }
        tables.comments.retain(|_, comment| comment.post_id != id);
        Ok(true)
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables.posts.values().cloned().collect();
        posts.sort_by(newest_first);

        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }

    async fn total_posts(&self) -> Result<i64, DomainError> {
        let tables = self.tables.read().await;
        i64::try_from(tables.posts.len()).map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    async fn list_posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, DomainError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|post| post.author_id == Some(author_id))
            .cloned()
            .collect();
        posts.sort_by(newest_first);
        Ok(posts)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&input.post_id) {
            return Err(DomainError::NotFound("post".to_string()));
        }
        if !tables.users.contains_key(&input.author_id) {
            return Err(DomainError::NotFound("user".to_string()));
        }

        let id = tables.last_comment_id + 1;
        let comment = Comment::new(
            id,
            input.content,
            Utc::now(),
            input.post_id,
            input.author_id,
        )?;
        tables.last_comment_id = id;
        tables.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn update_comment_owned(
        &self,
        comment_id: i64,
        owner_user_id: i64,
        content: String,
    ) -> Result<Option<Comment>, DomainError> {
        let mut tables = self.tables.write().await;
        let Some(comment) = tables
            .comments
            .get_mut(&comment_id)
            .filter(|comment| comment.author_id == owner_user_id)
        else {
            return Ok(None);
        };
        comment.content = content;
        Ok(Some(comment.clone()))
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.tables.write().await.comments.remove(&id).is_some())
    }

    async fn list_comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            a.published_at
                .cmp(&b.published_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::MemoryStore;
    use crate::data::author_repository::{AuthorRepository, NewAuthor};
    use crate::data::comment_repository::{CommentRepository, NewComment};
    use crate::data::post_repository::{NewPost, Pagination, PostRepository};
    use crate::data::user_repository::{NewUser, UserRepository};
    use crate::domain::error::DomainError;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: "John".to_string(),
            last_name: "Wick".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn new_post(title: &str, author_id: Option<i64>, age_minutes: i64) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: format!("{title} content"),
            published_at: Utc::now() - Duration::minutes(age_minutes),
            author_id,
        }
    }

    fn new_comment(content: &str, post_id: i64, author_id: i64) -> NewComment {
        NewComment {
            content: content.to_string(),
            post_id,
            author_id,
        }
    }

    #[tokio::test]
    async fn deleting_user_deletes_author_and_comments_but_keeps_posts() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("john")).await.expect("user");
        let author = store
            .create_author(NewAuthor {
                user_id: user.id,
                bio: None,
            })
            .await
            .expect("author");
        let post = store
            .create_post(new_post("kept", Some(author.id), 0))
            .await
            .expect("post");
        store
            .create_comment(new_comment("mine", post.id, user.id))
            .await
            .expect("comment");

        assert!(store.delete_user(user.id).await.expect("delete"));

        assert!(store.get_author(author.id).await.expect("get").is_none());
        let post = store.get_post(post.id).await.expect("get").expect("post kept");
        assert!(post.author_id.is_none());
        assert!(
            store
                .list_comments_for_post(post.id)
                .await
                .expect("list")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn deleting_post_deletes_its_comments_only() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("reader")).await.expect("user");
        let doomed = store.create_post(new_post("doomed", None, 0)).await.expect("post");
        let other = store.create_post(new_post("other", None, 0)).await.expect("post");
        let gone = store
            .create_comment(new_comment("gone", doomed.id, user.id))
            .await
            .expect("comment");
        let kept = store
            .create_comment(new_comment("kept", other.id, user.id))
            .await
            .expect("comment");

        assert!(store.delete_post(doomed.id).await.expect("delete"));

        assert!(store.get_comment(gone.id).await.expect("get").is_none());
        assert!(store.get_comment(kept.id).await.expect("get").is_some());
        assert!(!store.delete_post(doomed.id).await.expect("second delete"));
    }

    #[tokio::test]
    async fn one_author_per_user_and_foreign_keys_are_checked() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("john")).await.expect("user");
        store
            .create_author(NewAuthor {
                user_id: user.id,
                bio: None,
            })
            .await
            .expect("author");

        let err = store
            .create_author(NewAuthor {
                user_id: user.id,
                bio: None,
            })
            .await
            .expect_err("duplicate author");
        assert!(matches!(err, DomainError::AlreadyExists(_)));

        let err = store
            .create_post(new_post("ghost", Some(42), 0))
            .await
            .expect_err("missing author");
        assert!(matches!(err, DomainError::NotFound(resource) if resource == "author"));

        let err = store
            .create_comment(new_comment("ghost", 42, user.id))
            .await
            .expect_err("missing post");
        assert!(matches!(err, DomainError::NotFound(resource) if resource == "post"));

        let err = store
            .create_user(new_user("john"))
            .await
            .expect_err("duplicate username");
        assert!(matches!(err, DomainError::AlreadyExists(resource) if resource == "username"));
    }

    #[tokio::test]
    async fn listings_follow_entity_ordering() {
        let store = MemoryStore::new();
        let first = store.create_user(new_user("first")).await.expect("user");
        let second = store.create_user(new_user("second")).await.expect("user");
        // Created out of user order on purpose.
        store
            .create_author(NewAuthor {
                user_id: second.id,
                bio: None,
            })
            .await
            .expect("author");
        store
            .create_author(NewAuthor {
                user_id: first.id,
                bio: None,
            })
            .await
            .expect("author");

        let authors = store.list_authors().await.expect("list");
        let user_ids: Vec<_> = authors.iter().map(|author| author.user.id).collect();
        assert_eq!(user_ids, [first.id, second.id]);

        for (title, age) in [("old", 30), ("new", 1), ("middle", 10)] {
            store.create_post(new_post(title, None, age)).await.expect("post");
        }
        let posts = store
            .list_posts(Pagination {
                page: 1,
                page_size: 2,
            })
            .await
            .expect("list");
        let titles: Vec<_> = posts.iter().map(|post| post.title.as_str()).collect();
        assert_eq!(titles, ["new", "middle"]);

        let post_id = posts[0].id;
        let a = store
            .create_comment(new_comment("a", post_id, first.id))
            .await
            .expect("comment");
        let b = store
            .create_comment(new_comment("b", post_id, second.id))
            .await
            .expect("comment");
        let comments = store.list_comments_for_post(post_id).await.expect("list");
        let ids: Vec<_> = comments.iter().map(|comment| comment.id).collect();
        assert_eq!(ids, [a.id, b.id]);
    }

    #[tokio::test]
    async fn comment_edit_keeps_publication_time() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("reader")).await.expect("user");
        let post = store.create_post(new_post("post", None, 0)).await.expect("post");
        let comment = store
            .create_comment(new_comment("before", post.id, user.id))
            .await
            .expect("comment");

        let updated = store
            .update_comment_owned(comment.id, user.id, "after".to_string())
            .await
            .expect("update")
            .expect("owned comment");
        assert_eq!(updated.content, "after");
        assert_eq!(updated.published_at, comment.published_at);

        let not_owner = store
            .update_comment_owned(comment.id, user.id + 1, "hijack".to_string())
            .await
            .expect("update");
        assert!(not_owner.is_none());
    }
}
