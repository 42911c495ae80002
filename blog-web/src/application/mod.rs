pub(crate) mod auth_service;
pub(crate) mod author_service;
pub(crate) mod blog_service;
pub(crate) mod pagination;
