//! Vimshottari dasha period engine.
//!
//! This crate provides:
//! - The 9 grahas and 27 nakshatras with their Vimshottari lordship
//! - Lazy Mahadasha generation from a Moon anchor
//! - On-demand subdivision to arbitrary depth and active-period lookup
//! - Flattened, serializable timelines
//!
//! Instants are UTC Julian Dates; see `astrova_time` for calendar conversion.

pub mod dasha;
pub mod error;
pub mod graha;
pub mod nakshatra;

pub use dasha::{
    Anchor, DashaOptions, DashaPeriod, DashaSnapshot, DashaTimeline, PeriodRecord,
    TimelineRecord, YearConvention, build_dasha_timeline,
};
pub use error::DashaError;
pub use graha::{ALL_GRAHAS, Graha};
pub use nakshatra::{
    ALL_NAKSHATRAS_27, NAKSHATRA_SPAN_27, Nakshatra, NakshatraPosition, nakshatra_position,
};
