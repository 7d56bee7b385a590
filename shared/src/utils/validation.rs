//! Input normalization helpers shared by the service and HTTP layers

/// Maximum stored email length
pub const EMAIL_MAX_LEN: usize = 255;

/// Maximum stored first/last name length
pub const NAME_MAX_LEN: usize = 100;

/// Maximum data entry title length
pub const TITLE_MAX_LEN: usize = 200;

/// Maximum data entry description length
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// Maximum data entry category length
pub const CATEGORY_MAX_LEN: usize = 100;

/// Canonical form used for email uniqueness and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if a string is not blank
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if a string's character count is within bounds
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

/// `Err(actual)` when `value` is longer than `max` characters
pub fn check_max_len(value: &str, max: usize) -> Result<(), usize> {
    if length_between(value, 0, max) {
        Ok(())
    } else {
        Err(value.chars().count())
    }
}
