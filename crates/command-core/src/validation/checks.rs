// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Built-in string checks used by [`StrConstraints`](super::StrConstraints).

use validator::{ValidateEmail, ValidateLength};

/// `true` when the value has no non-whitespace character.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `true` when the value has at most `max` characters.
pub fn within_chars(value: &str, max: usize) -> bool {
    value.validate_length(None, Some(max as u64), None)
}

/// `true` when the value equals one of the allowed values.
pub fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

/// `true` when the value is a syntactically valid email address.
pub fn is_email(value: &str) -> bool {
    value.validate_email()
}

/// `true` when the value is non-empty and contains only ASCII letters,
/// digits and underscores.
pub fn is_identifier(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn char_limit_counts_characters() {
        assert!(within_chars("abc", 3));
        assert!(!within_chars("abcd", 3));
        assert!(within_chars("жжж", 3));
    }

    #[test]
    fn one_of_matches_exactly() {
        let allowed = ["ACTIVE", "INACTIVE"];
        assert!(is_one_of("ACTIVE", &allowed));
        assert!(!is_one_of("active", &allowed));
    }

    #[test]
    fn email_format() {
        assert!(is_email("jane@example.com"));
        assert!(!is_email("jane"));
        assert!(!is_email("jane@"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("a@b@c.com"));
        assert!(!is_email("jane doe@example.com"));
    }

    #[test]
    fn identifier_format() {
        assert!(is_identifier("jane_doe42"));
        assert!(!is_identifier("jane-doe"));
        assert!(!is_identifier(""));
    }
}
