//! UTC calendar date/time with millisecond-resolution rendering.
//!
//! `UtcTime` is the calendar face of the engine's Julian Date instants.
//! Conversion to JD is exact up to `f64` resolution; conversion back
//! rounds to the nearest millisecond so boundaries print cleanly.

use std::str::FromStr;

use crate::error::TimeError;
use crate::julian::{
    MILLIS_PER_DAY, SECONDS_PER_DAY, UNIX_EPOCH_JD, civil_from_days, days_from_civil,
    days_in_month, jd_to_day_millis,
};

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl UtcTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight at the start of the given date.
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    /// Check every field against the Gregorian calendar.
    pub fn validate(&self) -> Result<(), TimeError> {
        if !(1..=12).contains(&self.month) {
            return Err(TimeError::InvalidDate("month must be 1-12"));
        }
        if self.day == 0 || self.day > days_in_month(self.year, self.month) {
            return Err(TimeError::InvalidDate("day out of range for month"));
        }
        if self.hour > 23 {
            return Err(TimeError::InvalidDate("hour must be 0-23"));
        }
        if self.minute > 59 {
            return Err(TimeError::InvalidDate("minute must be 0-59"));
        }
        if !self.second.is_finite() || !(0.0..60.0).contains(&self.second) {
            return Err(TimeError::InvalidDate("second must be in [0, 60)"));
        }
        Ok(())
    }

    /// Convert to a Julian Date (UTC days).
    pub fn to_jd(&self) -> f64 {
        let days = days_from_civil(self.year, self.month, self.day);
        let day_frac = (self.hour as f64 * 3600.0 + self.minute as f64 * 60.0 + self.second)
            / SECONDS_PER_DAY;
        UNIX_EPOCH_JD + days as f64 + day_frac
    }

    /// Validate, then convert to a Julian Date.
    pub fn try_to_jd(&self) -> Result<f64, TimeError> {
        self.validate()?;
        Ok(self.to_jd())
    }

    /// Convert from a Julian Date, rounding to the nearest millisecond.
    pub fn from_jd(jd: f64) -> Result<Self, TimeError> {
        if !jd.is_finite() {
            return Err(TimeError::NonFiniteJd);
        }
        let (days, millis) = jd_to_day_millis(jd);
        debug_assert!((0..MILLIS_PER_DAY).contains(&millis));
        let (year, month, day) = civil_from_days(days);
        let hour = (millis / 3_600_000) as u32;
        let minute = ((millis % 3_600_000) / 60_000) as u32;
        let second = (millis % 60_000) as f64 / 1000.0;
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }
}

impl std::fmt::Display for UtcTime {
    /// Rounds to the millisecond, carrying into the minute, hour and date.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let day_ms = i64::from(self.hour) * 3_600_000
            + i64::from(self.minute) * 60_000
            + (self.second * 1000.0).round() as i64;
        let days = days_from_civil(self.year, self.month, self.day)
            + day_ms.div_euclid(MILLIS_PER_DAY);
        let ms = day_ms.rem_euclid(MILLIS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        let hour = ms / 3_600_000;
        let minute = (ms % 3_600_000) / 60_000;
        let second = (ms % 60_000) / 1000;
        let millis = ms % 1000;
        write!(f, "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}")?;
        if millis != 0 {
            write!(f, ".{millis:03}")?;
        }
        f.write_str("Z")
    }
}

impl FromStr for UtcTime {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD`, `YYYY-MM-DDThh:mm` or `YYYY-MM-DDThh:mm:ss[.fff]`,
    /// with an optional `Z` or `+00:00` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_suffix('Z')
            .or_else(|| s.strip_suffix("+00:00"))
            .unwrap_or(s);
        let (date, time) = match s.split_once(['T', ' ']) {
            Some((d, t)) => (d, Some(t)),
            None => (s, None),
        };

        let date_parts: Vec<&str> = date.split('-').collect();
        if date_parts.len() != 3 {
            return Err(TimeError::Parse(format!("expected YYYY-MM-DD, got {date}")));
        }
        let year: i32 = parse_field(date_parts[0])?;
        let month: u32 = parse_field(date_parts[1])?;
        let day: u32 = parse_field(date_parts[2])?;

        let (hour, minute, second) = match time {
            None => (0, 0, 0.0),
            Some(t) => {
                let parts: Vec<&str> = t.split(':').collect();
                match parts.as_slice() {
                    [h, m] => (parse_field(h)?, parse_field(m)?, 0.0),
                    [h, m, sec] => (parse_field(h)?, parse_field(m)?, parse_field(sec)?),
                    _ => return Err(TimeError::Parse(format!("expected hh:mm[:ss], got {t}"))),
                }
            }
        };

        let utc = Self::new(year, month, day, hour, minute, second);
        utc.validate()?;
        Ok(utc)
    }
}

fn parse_field<T: FromStr>(s: &str) -> Result<T, TimeError> {
    s.parse()
        .map_err(|_| TimeError::Parse(format!("invalid numeric field '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::J2000_JD;

    #[test]
    fn new_constructor() {
        let t = UtcTime::new(2024, 3, 20, 12, 30, 45.5);
        assert_eq!(t.year, 2024);
        assert_eq!(t.month, 3);
        assert_eq!(t.day, 20);
        assert_eq!(t.hour, 12);
        assert_eq!(t.minute, 30);
        assert!((t.second - 45.5).abs() < 1e-12);
    }

    #[test]
    fn display_whole_seconds() {
        let t = UtcTime::new(2024, 1, 15, 0, 0, 0.0);
        assert_eq!(t.to_string(), "2024-01-15T00:00:00Z");
    }

    #[test]
    fn display_milliseconds() {
        let t = UtcTime::new(2024, 1, 15, 12, 30, 45.125);
        assert_eq!(t.to_string(), "2024-01-15T12:30:45.125Z");
    }

    #[test]
    fn display_carries_rounded_seconds() {
        let t = UtcTime::new(2000, 1, 1, 0, 0, 59.9996);
        assert_eq!(t.to_string(), "2000-01-01T00:01:00Z");
        let t = UtcTime::new(1999, 12, 31, 23, 59, 59.9996);
        assert_eq!(t.to_string(), "2000-01-01T00:00:00Z");
        let t = UtcTime::new(2024, 2, 28, 23, 59, 59.9999);
        assert_eq!(t.to_string(), "2024-02-29T00:00:00Z");
    }

    #[test]
    fn noon_is_j2000() {
        let t = UtcTime::new(2000, 1, 1, 12, 0, 0.0);
        assert!((t.to_jd() - J2000_JD).abs() < 1e-12);
    }

    #[test]
    fn from_jd_rounds_to_midnight() {
        let jd = UtcTime::date(2000, 1, 1).to_jd() - 1e-9;
        let t = UtcTime::from_jd(jd).unwrap();
        assert_eq!(t.to_string(), "2000-01-01T00:00:00Z");
    }

    #[test]
    fn parse_variants() {
        let a: UtcTime = "2000-01-01T00:00:00Z".parse().unwrap();
        let b: UtcTime = "2000-01-01".parse().unwrap();
        let c: UtcTime = "2000-01-01T00:00+00:00".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        let d: UtcTime = "1990-07-04T06:15:30.250Z".parse().unwrap();
        assert_eq!(d.hour, 6);
        assert!((d.second - 30.25).abs() < 1e-12);
    }

    #[test]
    fn parse_rejects_invalid_day() {
        let r: Result<UtcTime, _> = "2023-02-29T00:00:00Z".parse();
        assert!(matches!(r, Err(TimeError::InvalidDate(_))));
    }

    #[test]
    fn parse_rejects_garbage() {
        let r: Result<UtcTime, _> = "yesterday".parse();
        assert!(matches!(r, Err(TimeError::Parse(_))));
    }

    #[test]
    fn from_jd_rejects_nan() {
        assert_eq!(UtcTime::from_jd(f64::NAN), Err(TimeError::NonFiniteJd));
    }
}
