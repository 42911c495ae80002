use super::error::DomainError;

pub(super) fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

/// Trims `value` and checks it holds `1..=max_chars` characters.
pub(super) fn normalize_required(
    field: &'static str,
    value: &str,
    max_chars: usize,
    message: &'static str,
) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max_chars {
        return Err(DomainError::Validation { field, message });
    }
    Ok(value.to_string())
}

/// Trims `value` and checks it holds at most `max_chars` characters. Empty input is kept.
pub(super) fn normalize_bounded(
    field: &'static str,
    value: &str,
    max_chars: usize,
    message: &'static str,
) -> Result<String, DomainError> {
    let value = value.trim();
    if value.chars().count() > max_chars {
        return Err(DomainError::Validation { field, message });
    }
    Ok(value.to_string())
}
