//! Top-level (Mahadasha) generation.
//!
//! The first Mahadasha belongs to the anchor nakshatra's lord and runs only
//! for the unelapsed balance. Every later one runs its full length, following
//! the planet cycle. Boundaries are computed as `first_end + cumulative_years
//! * days_per_year`, so rounding never accumulates along the chain.

use tracing::{debug, warn};

use crate::error::DashaError;
use crate::graha::Graha;

use super::anchor::Anchor;
use super::cycle::{VIMSHOTTARI_CYCLE, cycle_entry_after};
use super::options::DashaOptions;
use super::types::{DashaPeriod, Lineage, YearConvention};

/// Unbounded, lazily evaluated stream of Mahadashas from the anchor onward.
#[derive(Debug, Clone)]
pub struct MahadashaIter {
    first_graha: Graha,
    reference_jd: f64,
    first_end_jd: f64,
    days_per_year: f64,
    next_index: usize,
    years_after_first: u64,
}

impl MahadashaIter {
    /// Start the stream. Fails if the remaining balance is too small to
    /// produce a first period with `end > start` at `f64` resolution.
    pub fn new(anchor: &Anchor, year: YearConvention) -> Result<Self, DashaError> {
        let reference_jd = anchor.reference_jd();
        let first_end_jd = reference_jd + anchor.balance_days(year);
        if !(first_end_jd > reference_jd) {
            return Err(DashaError::InvalidAnchor(
                "remaining balance collapses to a zero-length period",
            ));
        }
        Ok(Self {
            first_graha: anchor.lord().graha,
            reference_jd,
            first_end_jd,
            days_per_year: year.days_per_year(),
            next_index: 0,
            years_after_first: 0,
        })
    }

    /// Periods up to and including the one containing `jd`.
    pub fn until(self, jd: f64) -> impl Iterator<Item = DashaPeriod> {
        self.take_while(move |p| p.start_jd <= jd)
    }

    fn boundary(&self, years: u64) -> f64 {
        self.first_end_jd + years as f64 * self.days_per_year
    }
}

impl Iterator for MahadashaIter {
    type Item = DashaPeriod;

    fn next(&mut self) -> Option<DashaPeriod> {
        let index = self.next_index;
        let order = u16::try_from(index + 1).unwrap_or(u16::MAX);

        let period = if index == 0 {
            DashaPeriod {
                graha: self.first_graha,
                depth: 1,
                start_jd: self.reference_jd,
                end_jd: self.first_end_jd,
                order,
                lineage: Lineage::root(self.first_graha),
            }
        } else {
            let entry = cycle_entry_after(self.first_graha, index % VIMSHOTTARI_CYCLE.len());
            let start_jd = self.boundary(self.years_after_first);
            let end_jd = self.boundary(self.years_after_first + entry.years as u64);
            if !(end_jd > start_jd) {
                return None;
            }
            self.years_after_first += entry.years as u64;
            DashaPeriod {
                graha: entry.graha,
                depth: 1,
                start_jd,
                end_jd,
                order,
                lineage: Lineage::root(entry.graha),
            }
        };

        self.next_index += 1;
        Some(period)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Generate the Mahadasha sequence for an anchor.
///
/// Without a horizon, one full cycle of 9 periods is produced (covering 120
/// years from the nominal start). With a horizon, periods are produced until
/// one contains it. Hitting `max_top_level_periods` first is
/// `InstantOutOfRange`.
pub fn mahadasha_sequence(
    anchor: &Anchor,
    options: &DashaOptions,
) -> Result<Vec<DashaPeriod>, DashaError> {
    options.validate()?;
    let cap = options.period_cap();
    let iter = MahadashaIter::new(anchor, options.year)?;

    let periods: Vec<DashaPeriod> = match options.horizon_jd {
        None => iter.take(VIMSHOTTARI_CYCLE.len().min(cap)).collect(),
        Some(horizon_jd) => {
            let mut periods = Vec::new();
            for period in iter.take(cap) {
                let covers = period.end_jd > horizon_jd;
                periods.push(period);
                if covers {
                    break;
                }
            }
            let start_jd = anchor.reference_jd();
            let end_jd = periods.last().map_or(start_jd, |p| p.end_jd);
            if end_jd <= horizon_jd {
                warn!(
                    horizon_jd,
                    end_jd,
                    cap,
                    "mahadasha cap reached before horizon"
                );
                return Err(DashaError::InstantOutOfRange {
                    query_jd: horizon_jd,
                    start_jd,
                    end_jd,
                });
            }
            periods
        }
    };

    debug!(
        lord = periods.first().map(|p| p.graha.name()),
        count = periods.len(),
        year = options.year.name(),
        "generated mahadasha sequence"
    );
    Ok(periods)
}
