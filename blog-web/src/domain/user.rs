use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;
use super::validation::{normalize_bounded, validate_positive_i64};

pub(crate) const NAME_MAX_CHARS: usize = 150;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_register_username(&self.username)?;
        let email = normalize_email(&self.email)?;
        let password_len = self.password.chars().count();
        if !(8..=128).contains(&password_len) {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 8..128 chars",
            });
        }
        Ok(Self {
            username,
            email,
            password: self.password,
            first_name: normalize_name("first_name", &self.first_name)?,
            last_name: normalize_name("last_name", &self.last_name)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..64 chars",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

/// A user account. Authors and comments hang off it.
#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        let username = normalize_register_username(&username.into())?;
        let email = normalize_email(&email.into())?;

        Ok(Self {
            id,
            username,
            email,
            first_name: normalize_name("first_name", &first_name.into())?,
            last_name: normalize_name("last_name", &last_name.into())?,
            created_at,
        })
    }
}

fn normalize_register_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    if username.len() < 3 || username.len() > 64 {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..64 chars",
        });
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

fn normalize_name(field: &'static str, name: &str) -> Result<String, DomainError> {
    normalize_bounded(field, name, NAME_MAX_CHARS, "must be at most 150 chars")
}

#[cfg(test)]
mod tests {
    use super::{RegisterRequest, User, normalize_email, normalize_register_username};
    use crate::domain::error::DomainError;
    use chrono::Utc;

    #[test]
    fn user_new_rejects_non_positive_id() {
        let result = User::new(0, "valid_user", "test@example.com", "", "", Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
    }

    #[test]
    fn register_username_rules_are_applied() {
        assert!(normalize_register_username("ab").is_err());
        assert!(normalize_register_username("valid_user").is_ok());
    }

    #[test]
    fn register_password_length_is_checked() {
        let short = register_request("short");
        assert!(short.validate().is_err());

        let validated = register_request("very-secure-password")
            .validate()
            .expect("must be valid");
        assert_eq!(validated.username, "john");
        assert_eq!(validated.email, "jlennon@beatles.com");
        assert_eq!(validated.first_name, "John");
        assert_eq!(validated.last_name, "Wick");
    }

    #[test]
    fn register_rejects_overlong_last_name() {
        let mut req = register_request("glass onion");
        req.last_name = "x".repeat(151);

        match req.validate() {
            Err(DomainError::Validation { field, .. }) => assert_eq!(field, "last_name"),
            other => panic!("expected last_name validation error, got {other:?}"),
        }
    }

    fn register_request(password: &str) -> RegisterRequest {
        RegisterRequest {
            username: "john".to_string(),
            email: " JLennon@Beatles.com ".to_string(),
            password: password.to_string(),
            first_name: " John ".to_string(),
            last_name: "Wick".to_string(),
        }
    }
}
