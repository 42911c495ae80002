use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::map_db_error;
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    content: String,
    published_at: DateTime<Utc>,
    post_id: i64,
    author_id: i64,
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (content, post_id, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, published_at, post_id, author_id
            "#,
        )
        .bind(&input.content)
        .bind(input.post_id)
        .bind(input.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_row_to_comment(row)
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, content, published_at, post_id, author_id
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_comment).transpose()
    }

    async fn update_comment_owned(
        &self,
        comment_id: i64,
        owner_user_id: i64,
        content: String,
    ) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET content = $3
            WHERE id = $1 AND author_id = $2
            RETURNING id, content, published_at, post_id, author_id
            "#,
        )
        .bind(comment_id)
        .bind(owner_user_id)
        .bind(&content)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_comment).transpose()
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, content, published_at, post_id, author_id
            FROM comments
            WHERE post_id = $1
            ORDER BY published_at ASC, id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(map_row_to_comment).collect()
    }
}

fn map_row_to_comment(row: CommentRow) -> Result<Comment, DomainError> {
    Comment::new(
        row.id,
        row.content,
        row.published_at,
        row.post_id,
        row.author_id,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}
