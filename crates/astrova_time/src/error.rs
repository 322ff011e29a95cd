//! Error types for calendar conversions.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar validation or ISO 8601 parsing.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// A calendar field is outside its valid range.
    InvalidDate(&'static str),
    /// ISO 8601 text could not be parsed.
    Parse(String),
    /// Julian Date is NaN or infinite.
    NonFiniteJd,
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            Self::Parse(msg) => write!(f, "ISO 8601 parse error: {msg}"),
            Self::NonFiniteJd => write!(f, "Julian Date is not finite"),
        }
    }
}

impl Error for TimeError {}
