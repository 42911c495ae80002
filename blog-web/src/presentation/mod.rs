use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::author_service::AuthorService;
use crate::application::blog_service::BlogService;
use crate::data::repositories::Repositories;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;


#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService>,
    pub(crate) blog_service: Arc<BlogService>,
    pub(crate) author_service: Arc<AuthorService>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(repos: Repositories, jwt: Arc<JwtService>) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(repos.users, jwt.clone())),
            blog_service: Arc::new(BlogService::new(
                repos.authors.clone(),
                repos.posts.clone(),
                repos.comments,
            )),
            author_service: Arc::new(AuthorService::new(repos.authors, repos.posts)),
            jwt,
        }
    }
}
