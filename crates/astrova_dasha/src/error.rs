//! Error types for dasha calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use astrova_time::TimeError;

/// Errors from the dasha period engine.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DashaError {
    /// Nakshatra index outside 0..=26.
    InvalidNakshatraIndex(u8),
    /// Anchor cannot produce a positive first period.
    InvalidAnchor(&'static str),
    /// Planet cycle table or engine options failed validation.
    InvalidConfig(&'static str),
    /// Query instant lies outside the generated periods.
    InstantOutOfRange {
        query_jd: f64,
        start_jd: f64,
        end_jd: f64,
    },
    /// Requested depth is deeper than the configured ceiling.
    DepthExceeded { requested: u8, max: u8 },
    /// Materializing the request would produce more than `limit` periods.
    PeriodLimitExceeded { level: u8, limit: usize },
    /// Requested depth is zero.
    InvalidDepth(u8),
    /// Calendar conversion of a supplied instant failed.
    Time(TimeError),
}

impl Display for DashaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNakshatraIndex(idx) => {
                write!(f, "invalid nakshatra index {idx}: expected 0-26")
            }
            Self::InvalidAnchor(msg) => write!(f, "invalid anchor: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::InstantOutOfRange {
                query_jd,
                start_jd,
                end_jd,
            } => write!(
                f,
                "instant JD {query_jd:.6} outside generated range [{start_jd:.6}, {end_jd:.6})"
            ),
            Self::DepthExceeded { requested, max } => {
                write!(f, "depth {requested} exceeds configured maximum {max}")
            }
            Self::PeriodLimitExceeded { level, limit } => write!(
                f,
                "expanding to depth {level} would produce more than {limit} periods"
            ),
            Self::InvalidDepth(d) => write!(f, "invalid depth {d}: must be at least 1"),
            Self::Time(e) => write!(f, "time error: {e}"),
        }
    }
}

impl Error for DashaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Time(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TimeError> for DashaError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
