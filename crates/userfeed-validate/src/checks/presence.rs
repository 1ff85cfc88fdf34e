//! Presence checks.

/// True when the value is non-empty.
pub fn required_non_empty(value: &str) -> bool {
    !value.is_empty()
}

/// True when a phone number was supplied.
///
/// Only drives the derived `is_phone_verified` flag; never a rejection cause.
pub fn phone_presence(value: &str) -> bool {
    !value.is_empty()
}
