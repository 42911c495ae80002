pub(crate) mod accounts;
pub(crate) mod authors;
pub(crate) mod comments;
pub(crate) mod posts;
