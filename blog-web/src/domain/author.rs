use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::user::User;
use super::validation::{normalize_bounded, validate_positive_i64};

pub(crate) const BIO_MAX_CHARS: usize = 500;

/// Author profile wrapping exactly one user account.
#[derive(Debug, Clone)]
pub(crate) struct Author {
    pub(crate) id: i64,
    pub(crate) user: User,
    pub(crate) bio: Option<String>,
}

impl Author {
    pub(crate) fn new(id: i64, user: User, bio: Option<String>) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        Ok(Self {
            id,
            user,
            bio: normalize_bio(bio)?,
        })
    }

    /// First and last name of the linked user, joined by a single space as stored.
    pub(crate) fn full_name(&self) -> String {
        format!("{} {}", self.user.first_name, self.user.last_name)
    }

    pub(crate) fn absolute_url(&self) -> String {
        format!("/author/{}", self.id)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct AuthorProfileRequest {
    pub(crate) bio: Option<String>,
}

impl AuthorProfileRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            bio: normalize_bio(self.bio)?,
        })
    }
}

fn normalize_bio(bio: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(bio) = bio else {
        return Ok(None);
    };
    let bio = normalize_bounded("bio", &bio, BIO_MAX_CHARS, "must be at most 500 chars")?;
    Ok(Some(bio).filter(|bio| !bio.is_empty()))
}
