//! # Validation — Password and Time-Limit Checks
//!
//! Input rules applied before anything reaches the search core. Each rule has
//! its own [`ValidationError`] variant whose `Display` is the exact message
//! shown to the user when re-prompting.
//!
//! Password rules, checked in this order:
//!
//! 1. at least `min_length` characters
//! 2. at most `max_length` characters
//! 3. letters only
//! 4. uppercase only
//! 5. every symbol drawn from the alphabet (only reachable with a custom one)
//!
//! Time limits must match `hh:mm:ss` exactly: two digits per field, hours
//! 00–23, minutes and seconds 00–59, and a non-zero total.

use std::time::Duration;

use crate::alphabet::Alphabet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    TooShort { min: usize },
    TooLong { max: usize },
    NotLetters,
    NotUppercase,
    OutsideAlphabet { symbol: char },
    TimeFormat,
    ZeroTime,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TooShort { min } => {
                write!(f, "The password must contain at least {} characters.", min)
            }
            ValidationError::TooLong { max } => {
                write!(f, "The password must be {} characters or less.", max)
            }
            ValidationError::NotLetters => {
                write!(f, "The password must be all letters (No symbols or numbers).")
            }
            ValidationError::NotUppercase => write!(f, "The password must be all UPPER-CASE."),
            ValidationError::OutsideAlphabet { symbol } => write!(
                f,
                "The password may only use symbols from the alphabet ({:?} is not one).",
                symbol
            ),
            ValidationError::TimeFormat => {
                write!(f, "Invalid time limit. Please use the format hh:mm:ss.")
            }
            ValidationError::ZeroTime => write!(f, "The time limit must be greater than zero."),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a password against the length bounds (inclusive) and the alphabet.
pub fn validate_password(
    password: &str,
    alphabet: &Alphabet,
    min_length: usize,
    max_length: usize,
) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < min_length {
        return Err(ValidationError::TooShort { min: min_length });
    }
    if len > max_length {
        return Err(ValidationError::TooLong { max: max_length });
    }
    if !password.chars().all(char::is_alphabetic) {
        return Err(ValidationError::NotLetters);
    }
    if !password.chars().all(char::is_uppercase) {
        return Err(ValidationError::NotUppercase);
    }
    if let Some(symbol) = password.chars().find(|&c| !alphabet.contains(c)) {
        return Err(ValidationError::OutsideAlphabet { symbol });
    }
    Ok(())
}

/// Parse an exact `hh:mm:ss` time limit.
pub fn parse_time_limit(input: &str) -> Result<Duration, ValidationError> {
    let fields: Vec<&str> = input.split(':').collect();
    let [h, m, s] = fields.as_slice() else {
        return Err(ValidationError::TimeFormat);
    };
    let hours = two_digit_field(h, 23)?;
    let minutes = two_digit_field(m, 59)?;
    let seconds = two_digit_field(s, 59)?;
    let total = hours * 3600 + minutes * 60 + seconds;
    if total == 0 {
        return Err(ValidationError::ZeroTime);
    }
    Ok(Duration::from_secs(total))
}

fn two_digit_field(field: &str, max: u64) -> Result<u64, ValidationError> {
    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::TimeFormat);
    }
    let value: u64 = field.parse().map_err(|_| ValidationError::TimeFormat)?;
    if value > max {
        return Err(ValidationError::TimeFormat);
    }
    Ok(value)
}
