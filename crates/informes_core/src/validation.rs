//! crates/informes_core/src/validation.rs
//!
//! Pure field validators. They never fail: an invalid value is reported through
//! `ValidationResult`, and a valid one carries an empty message.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{ReportDraft, ValidationResult};
use crate::messages::Messages;

/// Shortest password the identity provider accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9+._%\-]{1,256}@[A-Za-z0-9][A-Za-z0-9\-]{0,64}(\.[A-Za-z0-9][A-Za-z0-9\-]{0,25})+$",
    )
    .expect("email pattern is a valid regex")
});

pub fn validate_email(value: &str, messages: &Messages) -> ValidationResult {
    if value.is_empty() {
        return ValidationResult::invalid(messages.email_required);
    }
    if !EMAIL_PATTERN.is_match(value) {
        return ValidationResult::invalid(messages.email_invalid);
    }
    ValidationResult::ok()
}

pub fn validate_password(value: &str, messages: &Messages) -> ValidationResult {
    if value.is_empty() {
        return ValidationResult::invalid(messages.password_required);
    }
    if value.chars().count() < MIN_PASSWORD_LEN {
        return ValidationResult::invalid(messages.password_too_short(MIN_PASSWORD_LEN));
    }
    ValidationResult::ok()
}

/// Course, year and semester are validated together as one result.
pub fn validate_required(draft: &ReportDraft, messages: &Messages) -> ValidationResult {
    if draft.course.is_empty() || draft.year.is_empty() || draft.semester.is_empty() {
        ValidationResult::invalid(messages.required_fields)
    } else {
        ValidationResult::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use proptest::prelude::*;

    fn es() -> &'static Messages {
        Messages::for_locale(Locale::Es)
    }

    #[test]
    fn empty_email_is_required() {
        let result = validate_email("", es());
        assert!(!result.valid);
        assert_eq!(result.message, es().email_required);
    }

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "ana@example.com",
            "ana.perez+informes@uni.edu.pe",
            "a_b%c@sub-domain.example.org",
        ] {
            let result = validate_email(email, es());
            assert!(result.valid, "{} should be valid", email);
            assert!(result.message.is_empty());
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "ana",
            "ana@",
            "@example.com",
            "ana@example",
            "ana@.com",
            "ana @example.com",
            "ana@exa mple.com",
            "ana@example.com ",
        ] {
            let result = validate_email(email, es());
            assert!(!result.valid, "{} should be invalid", email);
            assert_eq!(result.message, es().email_invalid);
        }
    }

    #[test]
    fn password_boundary() {
        assert!(!validate_password("12345", es()).valid);
        assert!(validate_password("123456", es()).valid);
        assert_eq!(validate_password("", es()).message, es().password_required);
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        // five characters, more than six bytes
        assert!(!validate_password("ñañañ", es()).valid);
        assert!(validate_password("ñañaña", es()).valid);
    }

    #[test]
    fn required_fields_validate_as_a_set() {
        let mut draft = ReportDraft {
            course: String::new(),
            year: "2025".into(),
            semester: "1".into(),
            ..Default::default()
        };
        let result = validate_required(&draft, es());
        assert!(!result.valid);
        assert_eq!(result.message, es().required_fields);

        draft.course = "Programación".into();
        assert!(validate_required(&draft, es()).valid);
    }

    proptest! {
        #[test]
        fn strings_without_at_sign_are_invalid(s in "[^@]*") {
            let result = validate_email(&s, es());
            prop_assert!(!result.valid);
            prop_assert!(!result.message.is_empty());
        }

        #[test]
        fn addresses_without_dotted_domain_are_invalid(local in "[a-z]{1,10}", domain in "[a-z]{1,10}") {
            let email = format!("{}@{}", local, domain);
            prop_assert!(!validate_email(&email, es()).valid);
        }

        #[test]
        fn short_passwords_are_invalid(p in "\\PC{1,5}") {
            prop_assert!(!validate_password(&p, es()).valid);
        }

        #[test]
        fn long_enough_passwords_are_valid(p in "\\PC{6,40}") {
            let result = validate_password(&p, es());
            prop_assert!(result.valid);
            prop_assert!(result.message.is_empty());
        }
    }
}
