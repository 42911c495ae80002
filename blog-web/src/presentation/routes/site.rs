use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::authors::{get_author, list_authors};
use crate::presentation::handlers::comments::{comment_form, create_comment};
use crate::presentation::handlers::posts::{get_post, list_posts};
use crate::presentation::middleware::auth::login_required_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_posts))
        .route("/post/{id}", get(get_post))
        .route("/authors/", get(list_authors))
        .route("/author/{id}", get(get_author));

    let login_required = Router::new()
        .route(
            "/post/{id}/create-comment",
            get(comment_form).post(create_comment),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            login_required_middleware,
        ));

    public.merge(login_required)
}
