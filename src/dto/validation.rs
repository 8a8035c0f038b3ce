//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::dto::parse_system_time;

/// Validates that a required text field carries at least one
/// non-whitespace character.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("field must not be blank".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a star reward is a positive integer.
pub fn validate_stars(stars: u32) -> Result<(), ValidationError> {
    if stars == 0 {
        let mut err = ValidationError::new("stars_min");
        err.message = Some("star reward must be at least 1".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a deadline parses as an RFC 3339 timestamp.
///
/// # Examples
///
/// ```ignore
/// validate_deadline("2026-09-01T00:00:00Z")   // Ok
/// validate_deadline("next tuesday")            // Err
/// ```
pub fn validate_deadline(value: &str) -> Result<(), ValidationError> {
    if parse_system_time(value).is_none() {
        let mut err = ValidationError::new("deadline_format");
        err.message = Some("deadline must be an RFC 3339 timestamp".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Morning run").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("\t\n").is_err());
    }

    #[test]
    fn test_validate_stars() {
        assert!(validate_stars(1).is_ok());
        assert!(validate_stars(15).is_ok());
        assert!(validate_stars(0).is_err());
    }

    #[test]
    fn test_validate_deadline() {
        assert!(validate_deadline("2026-09-01T00:00:00Z").is_ok());
        assert!(validate_deadline("2026-09-01T12:30:00+02:00").is_ok());
        assert!(validate_deadline("2026-09-01").is_err()); // date only
        assert!(validate_deadline("soon").is_err());
        assert!(validate_deadline("").is_err());
    }
}
