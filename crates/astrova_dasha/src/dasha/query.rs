//! Locating the active period(s) at an instant.
//!
//! Sibling periods are contiguous and sorted, so the containing period is
//! found by binary search over end boundaries. Intervals are half-open: an
//! instant equal to a period's end belongs to the next sibling.

use tracing::debug;

use crate::error::DashaError;

use super::options::check_depth;
use super::subperiod::children_of;
use super::types::{DashaPeriod, DashaSnapshot, MAX_DASHA_DEPTH};

/// Index of the period containing `jd` in a contiguous, sorted slice.
pub fn find_active_period(periods: &[DashaPeriod], jd: f64) -> Option<usize> {
    let first = periods.first()?;
    let last = periods.last()?;
    if !(jd >= first.start_jd && jd < last.end_jd) {
        return None;
    }
    // First period whose end is strictly after jd.
    let idx = periods.partition_point(|p| p.end_jd <= jd);
    (idx < periods.len()).then_some(idx)
}

/// Active periods from depth 1 down to `depth`, outermost first.
///
/// `max_depth` is the timeline's subdivision ceiling; asking deeper is
/// `DepthExceeded`. Descent stops early only if a period is too short to
/// subdivide.
pub fn locate(
    mahadashas: &[DashaPeriod],
    query_jd: f64,
    depth: u8,
    max_depth: u8,
) -> Result<Vec<DashaPeriod>, DashaError> {
    check_depth(depth, max_depth.min(MAX_DASHA_DEPTH))?;

    let out_of_range = || DashaError::InstantOutOfRange {
        query_jd,
        start_jd: mahadashas.first().map_or(f64::NAN, |p| p.start_jd),
        end_jd: mahadashas.last().map_or(f64::NAN, |p| p.end_jd),
    };

    let idx = find_active_period(mahadashas, query_jd).ok_or_else(out_of_range)?;
    let mut chain = Vec::with_capacity(depth as usize);
    let mut current = mahadashas[idx];
    chain.push(current);

    while chain.len() < depth as usize {
        let children = children_of(&current, max_depth);
        match find_active_period(&children, query_jd) {
            Some(i) => {
                current = children[i];
                chain.push(current);
            }
            None => break,
        }
    }

    debug!(
        query_jd,
        depth,
        found = chain.len(),
        "located active dasha chain"
    );
    Ok(chain)
}

/// [`locate`] wrapped as a snapshot.
pub fn snapshot(
    mahadashas: &[DashaPeriod],
    query_jd: f64,
    depth: u8,
    max_depth: u8,
) -> Result<DashaSnapshot, DashaError> {
    let periods = locate(mahadashas, query_jd, depth, max_depth)?;
    Ok(DashaSnapshot { query_jd, periods })
}

/// Snapshot read off an already materialized hierarchy (linear scan per level).
pub fn snapshot_from_levels(levels: &[Vec<DashaPeriod>], query_jd: f64) -> DashaSnapshot {
    let mut periods: Vec<DashaPeriod> = Vec::with_capacity(levels.len());
    for level in levels {
        let parent = periods.last().copied();
        let found = level.iter().find(|p| {
            p.contains(query_jd)
                && parent.is_none_or(|par| p.lineage.ancestors() == par.lineage.as_slice())
        });
        match found {
            Some(p) => periods.push(*p),
            None => break,
        }
    }
    DashaSnapshot { query_jd, periods }
}
