use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation::{normalize_required, validate_positive_i64};

pub(crate) const TITLE_MAX_CHARS: usize = 200;
pub(crate) const CONTENT_MAX_CHARS: usize = 4000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) published_at: DateTime<Utc>,
    /// Cleared when the author profile is deleted.
    pub(crate) author_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) published_at: Option<DateTime<Utc>>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            published_at: self.published_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
        })
    }
}

impl Post {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        published_at: DateTime<Utc>,
        author_id: Option<i64>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        if let Some(author_id) = author_id {
            validate_positive_i64("author_id", author_id)?;
        }

        Ok(Self {
            id,
            title: normalize_title(&title.into())?,
            content: normalize_content(&content.into())?,
            published_at,
            author_id,
        })
    }

    pub(crate) fn absolute_url(&self) -> String {
        post_url(self.id)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

pub(crate) fn post_url(id: i64) -> String {
    format!("/post/{id}")
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    normalize_required("title", title, TITLE_MAX_CHARS, "must be 1..200 chars")
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    normalize_required("content", content, CONTENT_MAX_CHARS, "must be 1..4000 chars")
}
