//! Trim-and-measure rules shared by every text field.
//!
//! Lengths are counted in Unicode scalar values after trimming.

use super::ValidationError;

/// Upper bound for names and titles.
pub const MAX_TITLE_LEN: usize = 200;

/// Upper bound for person names.
pub const MAX_PERSON_NAME_LEN: usize = 100;

/// Upper bound for resource URLs.
pub const MAX_URL_LEN: usize = 2000;

/// Trims `value` and requires 1..=`max` characters.
pub fn required_text(field: &str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    check_length(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

/// Trims `value` and allows 0..=`max` characters. Absent becomes `""`.
pub fn optional_text(field: &str, value: Option<&str>, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.map(str::trim).unwrap_or("");
    check_length(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::too_long(field, max, len));
    }
    Ok(())
}
