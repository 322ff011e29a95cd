//! Vimshottari dasha (planetary period) calculations.
//!
//! The engine turns one astronomical fact, the Moon's nakshatra and the
//! fraction of it already traversed at a reference instant, into a tree of
//! ruling periods:
//! - Planet cycle table and nakshatra lord resolution
//! - Mahadasha generation (lazy, open-ended)
//! - Self-starting proportional subdivision to any depth, on demand
//! - Active-period lookup by binary search at each depth
//! - Flattening into time-ordered, serializable records
//!
//! Everything here is pure: no I/O, no shared mutable state.

pub mod anchor;
pub mod cycle;
pub mod format;
pub mod lord;
pub mod mahadasha;
pub mod options;
pub mod query;
pub mod subperiod;
pub mod timeline;
pub mod types;

pub use anchor::Anchor;
pub use cycle::{
    CycleEntry, VIMSHOTTARI_CYCLE, VIMSHOTTARI_TOTAL_YEARS, cycle_entry_after, cycle_from,
    cycle_position, graha_years, validate_cycle,
};
pub use format::{JdRange, PeriodRecord, TimelineRecord, flatten, to_wire_records};
pub use lord::{NakshatraLord, nakshatra_lord};
pub use mahadasha::{MahadashaIter, mahadasha_sequence};
pub use options::{DashaOptions, check_depth};
pub use query::{find_active_period, locate, snapshot, snapshot_from_levels};
pub use subperiod::{ChildCache, child_period, children_of, complete_level, hierarchy};
pub use timeline::{DashaTimeline, build_dasha_timeline};
pub use types::{
    DEFAULT_DASHA_DEPTH, DashaHierarchy, DashaLevel, DashaPeriod, DashaSnapshot, Lineage,
    MAX_DASHA_DEPTH, MAX_PERIODS_PER_LEVEL, MAX_TIMELINE_RECORDS, MAX_TOP_LEVEL_PERIODS,
    YearConvention, depth_name,
};
