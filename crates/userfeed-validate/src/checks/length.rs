//! Text length checks.
//!
//! Lengths are measured in bytes of the UTF-8 source text.

/// True when the value is non-empty and at most `max` bytes long.
///
/// An empty value fails this check as well as the presence check.
pub fn max_length(value: &str, max: usize) -> bool {
    !value.is_empty() && value.len() <= max
}

/// True when the value is longer than `max` bytes. Empty values never exceed.
pub fn exceeds_length(value: &str, max: usize) -> bool {
    value.len() > max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fails_max_length() {
        assert!(!max_length("", 255));
        assert!(!exceeds_length("", 255));
    }

    #[test]
    fn boundary_is_inclusive() {
        assert!(max_length("PE", 2));
        assert!(!max_length("PER", 2));
        assert!(exceeds_length("PER", 2));
    }

    #[test]
    fn multibyte_text_counts_bytes() {
        // "ñ" is two bytes
        assert!(!max_length("ññ", 3));
        assert!(max_length("ññ", 4));
    }
}
