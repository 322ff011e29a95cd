//! Sub-period generation (Antardasha and deeper).
//!
//! Children of a period ruled by Q always start with Q itself and then follow
//! the planet cycle, 9 children in total, each lasting
//! `parent_duration * child_years / 120`. The rule is the same at every depth.
//!
//! Child `k` ends at `parent.start + D * cum_years(k) / 120`; the last child
//! is snapped to `parent.end`. Siblings share boundary values exactly.

use std::collections::HashMap;

use tracing::trace;

use crate::error::DashaError;
use crate::graha::Graha;

use super::cycle::{VIMSHOTTARI_CYCLE, VIMSHOTTARI_TOTAL_YEARS, cycle_from};
use super::options::check_depth;
use super::types::{DashaHierarchy, DashaPeriod, MAX_DASHA_DEPTH, MAX_PERIODS_PER_LEVEL};

const CHILD_COUNT: usize = VIMSHOTTARI_CYCLE.len();

/// End offsets (days from parent start) of each child, self-starting order.
/// The last offset is `None`: it is snapped to the parent's end.
type ChildOffsets = [(Graha, Option<f64>); CHILD_COUNT];

fn child_offsets(ruler: Graha, duration_days: f64) -> ChildOffsets {
    let mut offsets = [(ruler, None); CHILD_COUNT];
    let mut cum_years = 0u32;
    for (slot, entry) in offsets.iter_mut().zip(cycle_from(ruler)) {
        cum_years += entry.years as u32;
        let end = if cum_years == VIMSHOTTARI_TOTAL_YEARS as u32 {
            None
        } else {
            Some(duration_days * (cum_years as f64 / VIMSHOTTARI_TOTAL_YEARS as f64))
        };
        *slot = (entry.graha, end);
    }
    offsets
}

fn assemble_children(parent: &DashaPeriod, offsets: &ChildOffsets) -> Vec<DashaPeriod> {
    let depth = parent.depth + 1;
    let mut children = Vec::with_capacity(CHILD_COUNT);
    let mut cursor = parent.start_jd;

    for (order_0, &(graha, end_offset)) in offsets.iter().enumerate() {
        let end = match end_offset {
            Some(off) => parent.start_jd + off,
            None => parent.end_jd,
        };
        let Some(lineage) = parent.lineage.push(graha) else {
            return Vec::new();
        };
        if !(end > cursor) {
            trace!(
                graha = parent.graha.name(),
                depth = parent.depth,
                "period too short to subdivide at f64 resolution"
            );
            return Vec::new();
        }
        children.push(DashaPeriod {
            graha,
            depth,
            start_jd: cursor,
            end_jd: end,
            order: (order_0 as u16) + 1,
            lineage,
        });
        cursor = end;
    }
    children
}

/// All children of a period, or empty once `max_depth` is reached.
///
/// Pure and idempotent: calling it twice yields identical sequences. A period
/// too short to split at `f64` resolution also yields no children.
pub fn children_of(parent: &DashaPeriod, max_depth: u8) -> Vec<DashaPeriod> {
    if parent.depth >= max_depth.min(MAX_DASHA_DEPTH) {
        return Vec::new();
    }
    let offsets = child_offsets(parent.graha, parent.duration_days());
    assemble_children(parent, &offsets)
}

/// One specific graha's sub-period within a parent.
pub fn child_period(parent: &DashaPeriod, graha: Graha, max_depth: u8) -> Option<DashaPeriod> {
    children_of(parent, max_depth)
        .into_iter()
        .find(|c| c.graha == graha)
}

/// Every child of every period in `parent_level`, in time order.
pub fn complete_level(
    parent_level: &[DashaPeriod],
    max_depth: u8,
) -> Result<Vec<DashaPeriod>, DashaError> {
    let estimated = parent_level.len() * CHILD_COUNT;
    if estimated > MAX_PERIODS_PER_LEVEL {
        let depth = parent_level.first().map_or(1, |p| p.depth);
        return Err(DashaError::PeriodLimitExceeded {
            level: depth + 1,
            limit: MAX_PERIODS_PER_LEVEL,
        });
    }
    let mut result = Vec::with_capacity(estimated);
    for parent in parent_level {
        result.extend(children_of(parent, max_depth));
    }
    Ok(result)
}

/// Materialize levels 1..=max_depth from a Mahadasha sequence.
pub fn hierarchy(
    mahadashas: &[DashaPeriod],
    max_depth: u8,
) -> Result<DashaHierarchy, DashaError> {
    check_depth(max_depth, MAX_DASHA_DEPTH)?;
    let reference_jd = mahadashas.first().map_or(f64::NAN, |p| p.start_jd);
    let mut levels: Vec<Vec<DashaPeriod>> = vec![mahadashas.to_vec()];

    for _ in 1..max_depth {
        let parent = levels.last().map(Vec::as_slice).unwrap_or_default();
        let children = complete_level(parent, max_depth)?;
        if children.is_empty() {
            break;
        }
        levels.push(children);
    }

    Ok(DashaHierarchy {
        reference_jd,
        levels,
    })
}

/// External memo table for child sequences.
///
/// Keyed by `(ruler, depth, duration bits)`: children are a pure function of
/// those values plus the parent's start and lineage, which are re-applied on
/// every hit. Periods themselves are never mutated.
#[derive(Debug, Default)]
pub struct ChildCache {
    table: HashMap<(Graha, u8, u64), ChildOffsets>,
    hits: u64,
    misses: u64,
}

impl ChildCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same result as [`children_of`], memoized.
    pub fn children_of(&mut self, parent: &DashaPeriod, max_depth: u8) -> Vec<DashaPeriod> {
        if parent.depth >= max_depth.min(MAX_DASHA_DEPTH) {
            return Vec::new();
        }
        let duration = parent.duration_days();
        let key = (parent.graha, parent.depth, duration.to_bits());
        let offsets = match self.table.get(&key) {
            Some(offsets) => {
                self.hits += 1;
                *offsets
            }
            None => {
                self.misses += 1;
                let offsets = child_offsets(parent.graha, duration);
                self.table.insert(key, offsets);
                offsets
            }
        };
        assemble_children(parent, &offsets)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
