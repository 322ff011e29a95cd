//! Calendar time support for the astrova dasha engine.
//!
//! This crate provides:
//! - Julian Date <-> proleptic Gregorian calendar conversions
//! - `UtcTime`, a validated UTC calendar value with ISO 8601 parse/format
//!
//! Instants throughout the workspace are UTC Julian Dates (`f64` days).

pub mod error;
pub mod julian;
pub mod utc_time;

pub use error::TimeError;
pub use julian::{
    J2000_JD, MILLIS_PER_DAY, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, civil_from_days,
    days_from_civil, days_in_month, is_leap_year, jd_to_calendar, jd_to_day_millis,
};
pub use utc_time::UtcTime;

/// Parse an ISO 8601 UTC string directly to a Julian Date.
pub fn iso_to_jd(s: &str) -> Result<f64, TimeError> {
    let utc: UtcTime = s.parse()?;
    Ok(utc.to_jd())
}

/// Format a Julian Date as an ISO 8601 UTC string.
pub fn jd_to_iso(jd: f64) -> Result<String, TimeError> {
    Ok(UtcTime::from_jd(jd)?.to_string())
}
