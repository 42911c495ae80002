use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::post::post_url;
use super::validation::{normalize_required, validate_positive_i64};

pub(crate) const COMMENT_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) content: String,
    /// Set by storage on insert and never changed afterwards.
    pub(crate) published_at: DateTime<Utc>,
    pub(crate) post_id: i64,
    /// Id of the commenting user account.
    pub(crate) author_id: i64,
}

impl Comment {
    pub(crate) fn new(
        id: i64,
        content: impl Into<String>,
        published_at: DateTime<Utc>,
        post_id: i64,
        author_id: i64,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("post_id", post_id)?;
        validate_positive_i64("author_id", author_id)?;

        Ok(Self {
            id,
            content: normalize_comment(&content.into())?,
            published_at,
            post_id,
            author_id,
        })
    }

    /// Comments live on their post's detail page.
    pub(crate) fn absolute_url(&self) -> String {
        post_url(self.post_id)
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CommentRequest {
    pub(crate) content: String,
}

impl CommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            content: normalize_comment(&self.content)?,
        })
    }
}

fn normalize_comment(content: &str) -> Result<String, DomainError> {
    normalize_required("content", content, COMMENT_MAX_CHARS, "must be 1..500 chars")
}
