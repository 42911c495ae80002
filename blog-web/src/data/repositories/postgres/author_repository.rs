use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::map_db_error;
use crate::data::author_repository::{AuthorRepository, NewAuthor};
use crate::domain::author::Author;
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct PostgresAuthorRepository {
    pool: PgPool,
}

impl PostgresAuthorRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// An `authors` row joined with its `users` row.
#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    bio: Option<String>,
    user_id: i64,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    user_created_at: DateTime<Utc>,
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn create_author(&self, input: NewAuthor) -> Result<Author, DomainError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            WITH inserted AS (
                INSERT INTO authors (user_id, bio)
                VALUES ($1, $2)
                RETURNING id, user_id, bio
            )
            SELECT
                a.id,
                a.bio,
                u.id AS user_id,
                u.username,
                u.email,
                u.first_name,
                u.last_name,
                u.created_at AS user_created_at
            FROM inserted a
            JOIN users u ON u.id = a.user_id
            "#,
        )
        .bind(input.user_id)
        .bind(&input.bio)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_row_to_author(row)
    }

    async fn get_author(&self, id: i64) -> Result<Option<Author>, DomainError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT
                a.id,
                a.bio,
                u.id AS user_id,
                u.username,
                u.email,
                u.first_name,
                u.last_name,
                u.created_at AS user_created_at
            FROM authors a
            JOIN users u ON u.id = a.user_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_author).transpose()
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<Author>, DomainError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT
                a.id,
                a.bio,
                u.id AS user_id,
                u.username,
                u.email,
                u.first_name,
                u.last_name,
                u.created_at AS user_created_at
            FROM authors a
            JOIN users u ON u.id = a.user_id
            WHERE a.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_author).transpose()
    }

    async fn list_authors(&self) -> Result<Vec<Author>, DomainError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT
                a.id,
                a.bio,
                u.id AS user_id,
                u.username,
                u.email,
                u.first_name,
                u.last_name,
                u.created_at AS user_created_at
            FROM authors a
            JOIN users u ON u.id = a.user_id
            ORDER BY a.user_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(map_row_to_author).collect()
    }

    async fn update_author_bio(
        &self,
        id: i64,
        bio: Option<String>,
    ) -> Result<Option<Author>, DomainError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            WITH updated AS (
                UPDATE authors
                SET bio = $2
                WHERE id = $1
                RETURNING id, user_id, bio
            )
            SELECT
                a.id,
                a.bio,
                u.id AS user_id,
                u.username,
                u.email,
                u.first_name,
                u.last_name,
                u.created_at AS user_created_at
            FROM updated a
            JOIN users u ON u.id = a.user_id
            "#,
        )
        .bind(id)
        .bind(&bio)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(map_row_to_author).transpose()
    }

    async fn delete_author(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row_to_author(row: AuthorRow) -> Result<Author, DomainError> {
    let user = User::new(
        row.user_id,
        row.username,
        row.email,
        row.first_name,
        row.last_name,
        row.user_created_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Author::new(row.id, user, row.bio).map_err(|err| DomainError::Unexpected(err.to_string()))
}
