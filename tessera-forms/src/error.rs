//! Error types for the explicit parsing APIs.
//!
//! The date field itself never reports these to its consumer: malformed
//! typed text degrades to "no suggestion" instead.
use thiserror::Error;

/// Failure to read a canonical `YYYY-MM-DD` value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// The text is not shaped like `YYYY-MM-DD`.
    #[error("expected a YYYY-MM-DD date, got {0:?}")]
    Format(String),
    /// The fields are well formed but do not name a real day.
    #[error("{year:04}-{month:02}-{day:02} is not a real calendar day")]
    NotARealDay {
        /// Parsed year.
        year: i32,
        /// Parsed month.
        month: u8,
        /// Parsed day.
        day: u8,
    },
}

/// Failure to read a locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The tag was empty or whitespace.
    #[error("locale tag is empty")]
    Empty,
    /// The tag does not look like `ll`, `ll-RR` or `ll_RR`.
    #[error("malformed locale tag {0:?}")]
    Malformed(String),
}
