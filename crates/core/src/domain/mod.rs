pub mod family;
pub mod ingredient;
pub mod sale;

use crate::errors::DomainError;

pub(crate) fn require_name(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(field, format!("must be a number >= 0, got {value}")));
    }
    Ok(())
}
