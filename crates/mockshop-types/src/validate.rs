//! Field-level checks shared by the entity rules.

use crate::error::{ValidationError, ValidationResult};

/// A required string: present and not blank after trimming.
pub(crate) fn required_text(field: &str, value: Option<String>) -> ValidationResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::missing(field)),
    }
}

/// A present string that must not be blank.
pub(crate) fn non_blank(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::invalid(field, "must not be empty"));
    }
    Ok(())
}

/// A finite, non-negative amount.
pub(crate) fn non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::invalid(field, "must be a non-negative number"));
    }
    Ok(())
}

pub(crate) fn positive_quantity(field: &str, quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::invalid(field, "must be at least 1"));
    }
    Ok(())
}

pub(crate) fn email(field: &str, value: &str) -> ValidationResult<()> {
    let trimmed = value.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::invalid(field, "must be an email address")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_absent_and_blank() {
        assert!(required_text("name", None).is_err());
        assert!(required_text("name", Some("  ".into())).is_err());
        assert_eq!(required_text("name", Some("x".into())).unwrap(), "x");
    }

    #[test]
    fn non_negative_rejects_nan() {
        assert!(non_negative("price", f64::NAN).is_err());
        assert!(non_negative("price", -0.5).is_err());
        assert!(non_negative("price", 0.0).is_ok());
    }

    #[test]
    fn email_shape() {
        assert!(email("email", "a@b").is_ok());
        assert!(email("email", "ab").is_err());
        assert!(email("email", "@b").is_err());
        assert!(email("email", "a@").is_err());
    }
}
