use crate::domain::error::DomainError;

pub(crate) mod author_repository;
pub(crate) mod comment_repository;
pub(crate) mod post_repository;
pub(crate) mod user_repository;

pub(crate) use author_repository::PostgresAuthorRepository;
pub(crate) use comment_repository::PostgresCommentRepository;
pub(crate) use post_repository::PostgresPostRepository;
pub(crate) use user_repository::PostgresUserRepository;

/// Turns constraint violations into domain errors; everything else is unexpected
/// and gets logged where the response is built.
fn map_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint();
        match db_err.code().as_deref() {
            Some("23505") => {
                let resource = match constraint {
                    Some("users_username_key") => "username",
                    Some("users_email_key") => "email",
                    Some("authors_user_id_key") => "author",
                    _ => "record",
                };
                return DomainError::AlreadyExists(resource.to_string());
            }
            Some("23503") => {
                let resource = match constraint {
                    Some("posts_author_id_fkey") => "author",
                    Some("comments_post_id_fkey") => "post",
                    Some("comments_author_id_fkey") | Some("authors_user_id_fkey") => "user",
                    _ => "referenced record",
                };
                return DomainError::NotFound(resource.to_string());
            }
            _ => {}
        }
    }
    DomainError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use sqlx::PgPool;

    use super::{
        PostgresAuthorRepository, PostgresCommentRepository, PostgresPostRepository,
        PostgresUserRepository, map_db_error,
    };
    use crate::data::author_repository::{AuthorRepository, NewAuthor};
    use crate::data::comment_repository::{CommentRepository, NewComment};
    use crate::data::post_repository::{NewPost, Pagination, PostRepository};
    use crate::data::user_repository::{NewUser, UserRepository};
    use crate::domain::error::DomainError;

    struct Repos {
        users: PostgresUserRepository,
        authors: PostgresAuthorRepository,
        posts: PostgresPostRepository,
        comments: PostgresCommentRepository,
    }

    fn repos(pool: PgPool) -> Repos {
        Repos {
            users: PostgresUserRepository::new(pool.clone()),
            authors: PostgresAuthorRepository::new(pool.clone()),
            posts: PostgresPostRepository::new(pool.clone()),
            comments: PostgresCommentRepository::new(pool),
        }
    }

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

    #[test]
    fn non_constraint_failures_are_unexpected() {
        let err = map_db_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DomainError::Unexpected(detail) if detail.contains("timed out")));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn deleting_user_cascades_to_author_and_comments(pool: PgPool) {
        let repos = repos(pool);
        let user = repos.users.create_user(new_user("john")).await.expect("user");
        let author = repos
            .authors
            .create_author(NewAuthor {
                user_id: user.id,
                bio: Some("This is me, from the movies.".to_string()),
            })
            .await
            .expect("author");
        let post = repos
            .posts
            .create_post(new_post("kept", Some(author.id), 0))
            .await
            .expect("post");
        repos
            .comments
            .create_comment(NewComment {
                content: "mine".to_string(),
                post_id: post.id,
                author_id: user.id,
            })
            .await
            .expect("comment");

        assert!(repos.users.delete_user(user.id).await.expect("delete user"));

        assert!(repos.authors.get_author(author.id).await.expect("query").is_none());
        let post = repos.posts.get_post(post.id).await.expect("query").expect("post kept");
        assert!(post.author_id.is_none());
        assert!(
            repos
                .comments
                .list_comments_for_post(post.id)
                .await
                .expect("query")
                .is_empty()
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn deleting_post_cascades_to_comments(pool: PgPool) {
        let repos = repos(pool);
        let user = repos.users.create_user(new_user("reader")).await.expect("user");
        let post = repos
            .posts
            .create_post(new_post("doomed", None, 0))
            .await
            .expect("post");
        let comment = repos
            .comments
            .create_comment(NewComment {
                content: "first".to_string(),
                post_id: post.id,
                author_id: user.id,
            })
            .await
            .expect("comment");

        assert!(repos.posts.delete_post(post.id).await.expect("delete post"));
        assert!(repos.comments.get_comment(comment.id).await.expect("query").is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn posts_are_listed_newest_first(pool: PgPool) {
        let repos = repos(pool);
        for (title, age) in [("old", 30), ("new", 1), ("middle", 10)] {
            repos
                .posts
                .create_post(new_post(title, None, age))
                .await
                .expect("post");
        }

        let posts = repos
            .posts
            .list_posts(Pagination {
                page: 1,
                page_size: 5,
            })
            .await
            .expect("list");
        let titles: Vec<_> = posts.iter().map(|post| post.title.as_str()).collect();
        assert_eq!(titles, ["new", "middle", "old"]);
        assert_eq!(repos.posts.total_posts().await.expect("count"), 3);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn constraint_violations_map_to_domain_errors(pool: PgPool) {
        let repos = repos(pool);
        let user = repos.users.create_user(new_user("john")).await.expect("user");

        let err = repos
            .users
            .create_user(new_user("john"))
            .await
            .expect_err("duplicate username");
        assert!(matches!(err, DomainError::AlreadyExists(resource) if resource == "username"));

        repos
            .authors
            .create_author(NewAuthor {
                user_id: user.id,
                bio: None,
            })
            .await
            .expect("author");
        let err = repos
            .authors
            .create_author(NewAuthor {
                user_id: user.id,
                bio: None,
            })
            .await
            .expect_err("second author for the same user");
        assert!(matches!(err, DomainError::AlreadyExists(resource) if resource == "author"));

        let err = repos
            .comments
            .create_comment(NewComment {
                content: "orphan".to_string(),
                post_id: 999,
                author_id: user.id,
            })
            .await
            .expect_err("missing post");
        assert!(matches!(err, DomainError::NotFound(resource) if resource == "post"));
    }
}
