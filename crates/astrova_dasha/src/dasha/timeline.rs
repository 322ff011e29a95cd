//! `DashaTimeline`: the engine's entry point for callers.
//!
//! Holds only the Mahadasha sequence. Deeper levels are derived on demand,
//! so building a timeline is O(number of Mahadashas) regardless of
//! `max_depth`.

use astrova_time::UtcTime;
use tracing::debug;

use crate::error::DashaError;

use super::anchor::Anchor;
use super::format::{JdRange, PeriodRecord, TimelineRecord, flatten, to_wire_records};
use super::mahadasha::mahadasha_sequence;
use super::options::DashaOptions;
use super::query::{locate, snapshot};
use super::subperiod::{children_of, hierarchy};
use super::types::{DashaHierarchy, DashaPeriod, DashaSnapshot};

/// A built Vimshottari timeline.
#[derive(Debug, Clone)]
pub struct DashaTimeline {
    anchor: Anchor,
    options: DashaOptions,
    mahadashas: Vec<DashaPeriod>,
}

/// Build the Mahadasha sequence for `anchor` under `options`.
pub fn build_dasha_timeline(
    anchor: &Anchor,
    options: &DashaOptions,
) -> Result<DashaTimeline, DashaError> {
    let mahadashas = mahadasha_sequence(anchor, options)?;
    debug!(
        nakshatra = anchor.nakshatra_index(),
        progress = anchor.progress(),
        max_depth = options.max_depth,
        "built dasha timeline"
    );
    Ok(DashaTimeline {
        anchor: *anchor,
        options: *options,
        mahadashas,
    })
}

impl DashaTimeline {
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn options(&self) -> &DashaOptions {
        &self.options
    }

    /// Depth-1 periods in time order.
    pub fn root_sequence(&self) -> &[DashaPeriod] {
        &self.mahadashas
    }

    /// Start of the covered range (the anchor instant).
    pub fn start_jd(&self) -> f64 {
        self.mahadashas.first().map_or(self.anchor.reference_jd(), |p| p.start_jd)
    }

    /// Exclusive end of the covered range.
    pub fn end_jd(&self) -> f64 {
        self.mahadashas.last().map_or(self.anchor.reference_jd(), |p| p.end_jd)
    }

    /// Nominal start of the first Mahadasha, before the anchor.
    pub fn nominal_start_jd(&self) -> f64 {
        self.anchor.nominal_start_jd(self.options.year)
    }

    /// Sub-periods of `period`; empty at the timeline's `max_depth`.
    pub fn children_of(&self, period: &DashaPeriod) -> Vec<DashaPeriod> {
        children_of(period, self.options.max_depth)
    }

    /// Active periods at `query_jd`, Mahadasha first, down to `depth`.
    pub fn locate(&self, query_jd: f64, depth: u8) -> Result<Vec<DashaPeriod>, DashaError> {
        locate(&self.mahadashas, query_jd, depth, self.options.max_depth)
    }

    /// [`Self::locate`] at a UTC calendar instant.
    pub fn locate_utc(&self, query: &UtcTime, depth: u8) -> Result<Vec<DashaPeriod>, DashaError> {
        self.locate(query.try_to_jd()?, depth)
    }

    pub fn snapshot(&self, query_jd: f64, depth: u8) -> Result<DashaSnapshot, DashaError> {
        snapshot(&self.mahadashas, query_jd, depth, self.options.max_depth)
    }

    /// Flattened records down to `max_depth` (capped by the timeline's own).
    pub fn flatten(&self, max_depth: u8) -> Result<Vec<TimelineRecord>, DashaError> {
        flatten(&self.mahadashas, self.depth_cap(max_depth), None)
    }

    /// Flattened records overlapping `range`.
    pub fn flatten_range(
        &self,
        max_depth: u8,
        range: JdRange,
    ) -> Result<Vec<TimelineRecord>, DashaError> {
        flatten(&self.mahadashas, self.depth_cap(max_depth), Some(range))
    }

    /// Wire records for the flattened timeline.
    pub fn records(
        &self,
        max_depth: u8,
        range: Option<JdRange>,
    ) -> Result<Vec<PeriodRecord>, DashaError> {
        let flat = flatten(&self.mahadashas, self.depth_cap(max_depth), range)?;
        to_wire_records(&flat, self.options.year)
    }

    /// Every level materialized down to `max_depth`.
    pub fn hierarchy(&self, max_depth: u8) -> Result<DashaHierarchy, DashaError> {
        hierarchy(&self.mahadashas, self.depth_cap(max_depth))
    }

    fn depth_cap(&self, max_depth: u8) -> u8 {
        max_depth.min(self.options.max_depth)
    }
}
