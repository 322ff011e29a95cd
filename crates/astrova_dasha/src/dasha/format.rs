//! Flattening period trees into time-ordered records.
//!
//! Records come out in pre-order: each period is followed by its children,
//! which start at the same instant. Within one depth the records are
//! contiguous with no gaps or overlaps.

use serde::{Deserialize, Serialize};

use crate::error::DashaError;
use crate::graha::Graha;

use super::subperiod::children_of;
use super::types::{DashaPeriod, MAX_DASHA_DEPTH, MAX_TIMELINE_RECORDS, YearConvention};

/// Half-open JD UTC window `[from_jd, to_jd)` used to filter timelines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JdRange {
    pub from_jd: f64,
    pub to_jd: f64,
}

impl JdRange {
    pub fn new(from_jd: f64, to_jd: f64) -> Self {
        Self { from_jd, to_jd }
    }

    /// Whether a period shares any instant with the window.
    pub fn overlaps(&self, period: &DashaPeriod) -> bool {
        period.start_jd < self.to_jd && period.end_jd > self.from_jd
    }
}

/// One flattened period with its ancestor chain.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRecord {
    pub graha: Graha,
    pub depth: u8,
    pub start_jd: f64,
    pub end_jd: f64,
    /// Ancestor rulers, Mahadasha first; empty at depth 1.
    pub parent_chain: Vec<Graha>,
}

impl From<&DashaPeriod> for TimelineRecord {
    fn from(period: &DashaPeriod) -> Self {
        Self {
            graha: period.graha,
            depth: period.depth,
            start_jd: period.start_jd,
            end_jd: period.end_jd,
            parent_chain: period.lineage.ancestors().to_vec(),
        }
    }
}

impl TimelineRecord {
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// Serializable form with ISO 8601 boundaries.
    pub fn to_wire(&self, year: YearConvention) -> Result<PeriodRecord, DashaError> {
        let years = self.duration_days() / year.days_per_year();
        Ok(PeriodRecord {
            planet: self.graha.english_name().to_string(),
            depth: self.depth,
            start_iso8601: astrova_time::jd_to_iso(self.start_jd)?,
            end_iso8601: astrova_time::jd_to_iso(self.end_jd)?,
            duration_years_approx: (years * 1e6).round() / 1e6,
            parent_planet_chain: self
                .parent_chain
                .iter()
                .map(|g| g.english_name().to_string())
                .collect(),
        })
    }
}

/// Wire shape consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub planet: String,
    pub depth: u8,
    #[serde(rename = "startISO8601")]
    pub start_iso8601: String,
    #[serde(rename = "endISO8601")]
    pub end_iso8601: String,
    pub duration_years_approx: f64,
    #[serde(default)]
    pub parent_planet_chain: Vec<String>,
}

/// Flatten `roots` down to `max_depth`, optionally keeping only periods that
/// overlap `range`. `max_depth == 0` or empty `roots` yields an empty list.
///
/// Fails with `PeriodLimitExceeded` rather than produce more than
/// [`MAX_TIMELINE_RECORDS`] records. Without a range the full tree size is
/// checked up front; with one, the walk stops at the limit.
pub fn flatten(
    roots: &[DashaPeriod],
    max_depth: u8,
    range: Option<JdRange>,
) -> Result<Vec<TimelineRecord>, DashaError> {
    let mut out = Vec::new();
    if max_depth == 0 || roots.is_empty() {
        return Ok(out);
    }
    if range.is_none() && full_tree_size(roots.len(), max_depth) > MAX_TIMELINE_RECORDS {
        return Err(DashaError::PeriodLimitExceeded {
            level: max_depth.min(MAX_DASHA_DEPTH),
            limit: MAX_TIMELINE_RECORDS,
        });
    }
    walk(roots, max_depth, range.as_ref(), &mut out)?;
    Ok(out)
}

/// Node count of `roots` fully subdivided down to `max_depth`.
fn full_tree_size(roots: usize, max_depth: u8) -> usize {
    let mut level = roots;
    let mut total = roots;
    for _ in 1..max_depth.min(MAX_DASHA_DEPTH) {
        level = level.saturating_mul(9);
        total = total.saturating_add(level);
    }
    total
}

fn walk(
    periods: &[DashaPeriod],
    max_depth: u8,
    range: Option<&JdRange>,
    out: &mut Vec<TimelineRecord>,
) -> Result<(), DashaError> {
    for period in periods {
        if range.is_some_and(|r| !r.overlaps(period)) {
            continue;
        }
        if out.len() >= MAX_TIMELINE_RECORDS {
            return Err(DashaError::PeriodLimitExceeded {
                level: period.depth,
                limit: MAX_TIMELINE_RECORDS,
            });
        }
        out.push(TimelineRecord::from(period));
        if period.depth < max_depth {
            let children = children_of(period, max_depth);
            walk(&children, max_depth, range, out)?;
        }
    }
    Ok(())
}

/// Convert flattened records to their wire form.
pub fn to_wire_records(
    records: &[TimelineRecord],
    year: YearConvention,
) -> Result<Vec<PeriodRecord>, DashaError> {
    records.iter().map(|r| r.to_wire(year)).collect()
}
