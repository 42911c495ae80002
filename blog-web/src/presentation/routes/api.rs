use axum::Router;
use axum::middleware;
use axum::routing::{post, put};

use crate::presentation::AppState;
use crate::presentation::handlers::authors::{
    create_author_profile, delete_author_profile, update_author_profile,
};
use crate::presentation::handlers::comments::{delete_comment, update_comment};
use crate::presentation::handlers::posts::{create_post, delete_post, update_post};
use crate::presentation::middleware::auth::jwt_auth_middleware;

/// Authoring endpoints; every route needs a bearer token.
pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/authors", post(create_author_profile))
        .route(
            "/authors/me",
            put(update_author_profile).delete(delete_author_profile),
        )
        .route("/posts", post(create_post))
        .route("/posts/{id}", put(update_post).delete(delete_post))
        .route("/comments/{id}", put(update_comment).delete(delete_comment))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
