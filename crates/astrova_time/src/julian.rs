//! Julian Date <-> proleptic Gregorian calendar conversions.
//!
//! Day counting uses the integer civil-day algorithm, so leap years
//! (divisible by 4, except centuries not divisible by 400) are exact.
//! Julian Dates here are UTC days; no leap-second handling is applied.

/// Julian Date of J2000.0 (2000-01-01T12:00:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01T00:00:00).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Days from 1970-01-01 to the given civil date.
pub fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Civil date for a day count relative to 1970-01-01.
pub fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = (yoe + era * 400 + i64::from(month <= 2)) as i32;
    (year, month, day)
}

/// Whether `year` is a Gregorian leap year.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month of the given year.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Convert a calendar date with fractional day to a Julian Date.
///
/// `day_frac` is the day of month plus the fraction of the day elapsed
/// (e.g. 1.5 = noon on the 1st).
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let whole = day_frac.floor();
    let days = days_from_civil(year, month, whole as u32);
    UNIX_EPOCH_JD + days as f64 + (day_frac - whole)
}

/// Convert a Julian Date to `(year, month, day_frac)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let shifted = jd - UNIX_EPOCH_JD;
    let days = shifted.floor();
    let (year, month, day) = civil_from_days(days as i64);
    (year, month, day as f64 + (shifted - days))
}

/// Split a Julian Date into whole days since 1970-01-01 and milliseconds
/// into that day, rounded to the nearest millisecond with carry.
pub fn jd_to_day_millis(jd: f64) -> (i64, i64) {
    let shifted = jd - UNIX_EPOCH_JD;
    let days = shifted.floor();
    let mut day = days as i64;
    let mut millis = ((shifted - days) * MILLIS_PER_DAY as f64).round() as i64;
    if millis >= MILLIS_PER_DAY {
        millis -= MILLIS_PER_DAY;
        day += 1;
    }
    (day, millis)
}
