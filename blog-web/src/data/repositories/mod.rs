use std::sync::Arc;

use sqlx::PgPool;

use crate::data::author_repository::AuthorRepository;
use crate::data::comment_repository::CommentRepository;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;

pub(crate) mod memory;
pub(crate) mod postgres;

/// One handle per table, all backed by the same storage.
#[derive(Clone)]
pub(crate) struct Repositories {
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) authors: Arc<dyn AuthorRepository>,
    pub(crate) posts: Arc<dyn PostRepository>,
    pub(crate) comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    pub(crate) fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(postgres::PostgresUserRepository::new(pool.clone())),
            authors: Arc::new(postgres::PostgresAuthorRepository::new(pool.clone())),
            posts: Arc::new(postgres::PostgresPostRepository::new(pool.clone())),
            comments: Arc::new(postgres::PostgresCommentRepository::new(pool)),
        }
    }

    pub(crate) fn memory() -> Self {
        let store = Arc::new(memory::MemoryStore::new());
        Self {
            users: store.clone(),
            authors: store.clone(),
            posts: store.clone(),
            comments: store,
        }
    }
}
