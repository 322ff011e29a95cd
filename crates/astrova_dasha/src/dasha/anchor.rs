//! The anchor: Moon's nakshatra and elapsed fraction at a reference instant.
//!
//! `progress` is the fraction of the lord's Mahadasha already elapsed before
//! the reference instant, so `1 - progress` of it remains (the birth balance).

use astrova_time::UtcTime;

use crate::error::DashaError;
use crate::nakshatra::{Nakshatra, nakshatra_position};

use super::lord::{NakshatraLord, nakshatra_lord};
use super::types::YearConvention;

/// Validated starting point for a dasha timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    nakshatra_index: u8,
    progress: f64,
    reference_jd: f64,
    lord: NakshatraLord,
}

impl Anchor {
    /// Build an anchor from a nakshatra index, elapsed fraction and JD UTC.
    pub fn new(nakshatra_index: u8, progress: f64, reference_jd: f64) -> Result<Self, DashaError> {
        let lord = nakshatra_lord(nakshatra_index)?;
        if !progress.is_finite() || !(0.0..1.0).contains(&progress) {
            return Err(DashaError::InvalidAnchor(
                "progress fraction must be in [0, 1)",
            ));
        }
        if !reference_jd.is_finite() {
            return Err(DashaError::InvalidAnchor("reference instant must be finite"));
        }
        Ok(Self {
            nakshatra_index,
            progress,
            reference_jd,
            lord,
        })
    }

    /// Build an anchor at a UTC calendar instant.
    pub fn at_utc(
        nakshatra_index: u8,
        progress: f64,
        reference: &UtcTime,
    ) -> Result<Self, DashaError> {
        let jd = reference.try_to_jd()?;
        Self::new(nakshatra_index, progress, jd)
    }

    /// Derive the anchor from the Moon's sidereal longitude in degrees.
    pub fn from_moon_longitude(
        moon_sidereal_lon: f64,
        reference_jd: f64,
    ) -> Result<Self, DashaError> {
        if !moon_sidereal_lon.is_finite() {
            return Err(DashaError::InvalidAnchor("moon longitude must be finite"));
        }
        let pos = nakshatra_position(moon_sidereal_lon);
        Self::new(pos.nakshatra_index, pos.progress, reference_jd)
    }

    pub fn nakshatra_index(&self) -> u8 {
        self.nakshatra_index
    }

    pub fn nakshatra(&self) -> Option<Nakshatra> {
        Nakshatra::from_index(self.nakshatra_index)
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn reference_jd(&self) -> f64 {
        self.reference_jd
    }

    /// Lord of the anchor nakshatra, ruler of the first Mahadasha.
    pub fn lord(&self) -> NakshatraLord {
        self.lord
    }

    /// Years of the first Mahadasha elapsed before the reference instant.
    pub fn elapsed_years(&self) -> f64 {
        self.lord.years as f64 * self.progress
    }

    /// Years of the first Mahadasha remaining after the reference instant.
    pub fn balance_years(&self) -> f64 {
        self.lord.years as f64 * (1.0 - self.progress)
    }

    /// Remaining days of the first Mahadasha.
    pub fn balance_days(&self, year: YearConvention) -> f64 {
        self.balance_years() * year.days_per_year()
    }

    /// JD at which the first Mahadasha nominally began, before the anchor.
    pub fn nominal_start_jd(&self, year: YearConvention) -> f64 {
        self.reference_jd - self.elapsed_years() * year.days_per_year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graha::Graha;

    const J2000_MIDNIGHT: f64 = 2_451_544.5;

    #[test]
    fn fresh_anchor_has_full_balance() {
        let a = Anchor::new(8, 0.0, J2000_MIDNIGHT).unwrap();
        assert_eq!(a.lord().graha, Graha::Buddh);
        assert!((a.balance_years() - 17.0).abs() < 1e-12);
        assert_eq!(a.nominal_start_jd(YearConvention::Gregorian), J2000_MIDNIGHT);
    }

    #[test]
    fn half_elapsed() {
        let a = Anchor::new(8, 0.5, J2000_MIDNIGHT).unwrap();
        assert!((a.balance_years() - 8.5).abs() < 1e-12);
        let nominal = a.nominal_start_jd(YearConvention::Gregorian);
        assert!((J2000_MIDNIGHT - nominal - 8.5 * 365.2425).abs() < 1e-6);
    }

    #[test]
    fn rejects_full_progress() {
        assert_eq!(
            Anchor::new(0, 1.0, J2000_MIDNIGHT),
            Err(DashaError::InvalidAnchor("progress fraction must be in [0, 1)"))
        );
    }

    #[test]
    fn rejects_negative_and_nan_progress() {
        assert!(Anchor::new(0, -0.1, J2000_MIDNIGHT).is_err());
        assert!(Anchor::new(0, f64::NAN, J2000_MIDNIGHT).is_err());
    }

    #[test]
    fn rejects_bad_index_before_progress() {
        assert_eq!(
            Anchor::new(30, 2.0, J2000_MIDNIGHT),
            Err(DashaError::InvalidNakshatraIndex(30))
        );
    }

    #[test]
    fn from_moon_longitude_mid_rohini() {
        let lon = 40.0 + crate::nakshatra::NAKSHATRA_SPAN_27 / 2.0;
        let a = Anchor::from_moon_longitude(lon, J2000_MIDNIGHT).unwrap();
        assert_eq!(a.nakshatra(), Some(Nakshatra::Rohini));
        assert_eq!(a.lord().graha, Graha::Chandra);
        assert!((a.balance_years() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn at_utc_validates_calendar() {
        let bad = UtcTime::new(2001, 2, 29, 0, 0, 0.0);
        assert!(matches!(
            Anchor::at_utc(0, 0.0, &bad),
            Err(DashaError::Time(_))
        ));
    }
}
