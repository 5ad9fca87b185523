//! API route handlers and shared validation helpers.

pub mod auth;
pub mod health;
pub mod items;
pub mod theme;

use regex::Regex;

/// Normalize an email for lookup/uniqueness checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Lightweight email sanity check used before persisting data.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Passwords need at least 8 characters with one letter and one digit.
pub fn valid_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|ch| ch.is_ascii_alphabetic())
        && password.chars().any(|ch| ch.is_ascii_digit())
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn valid_email_accepts_simple() {
        assert!(valid_email("user@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("user.example.com"));
        assert!(!valid_email("missing-domain@"));
        assert!(!valid_email("@example.com "));
    }

    #[test]
    fn valid_password_requires_length_letter_and_digit() {
        assert!(valid_password("abcdef12"));
        assert!(!valid_password("abc12"));
        assert!(!valid_password("abcdefgh"));
        assert!(!valid_password("12345678"));
    }
}
