pub(crate) mod author;
pub(crate) mod comment;
pub(crate) mod error;
pub(crate) mod post;
pub(crate) mod user;
mod validation;
