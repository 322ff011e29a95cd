//! Core types for Vimshottari dasha calculations.
//!
//! A dasha tree is never stored. Every period carries its own ancestry as a
//! small inline [`Lineage`], so children can be derived on demand from the
//! period value alone and no parent back-references exist.

use std::str::FromStr;

use crate::graha::Graha;

/// Safety ceiling on nesting depth (Mahadasha = 1).
pub const MAX_DASHA_DEPTH: u8 = 10;

/// Default depth for timelines (Mahadasha, Antardasha, Pratyantardasha).
pub const DEFAULT_DASHA_DEPTH: u8 = 3;

/// Hard cap on generated top-level periods.
pub const MAX_TOP_LEVEL_PERIODS: usize = 10_000;

/// Hard cap on periods per materialized level to prevent combinatorial explosion.
pub const MAX_PERIODS_PER_LEVEL: usize = 100_000;

/// Hard cap on records produced by one flattening pass.
pub const MAX_TIMELINE_RECORDS: usize = 1_000_000;

/// Day count used to turn dasha years into calendar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YearConvention {
    /// Gregorian mean year, 365.2425 days.
    #[default]
    Gregorian,
    /// Julian year, 365.25 days.
    Julian,
    /// Savana (civil) year, 360 days.
    Savana,
}

impl YearConvention {
    pub const fn days_per_year(self) -> f64 {
        match self {
            Self::Gregorian => 365.2425,
            Self::Julian => 365.25,
            Self::Savana => 360.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Gregorian => "gregorian",
            Self::Julian => "julian",
            Self::Savana => "savana",
        }
    }
}

impl FromStr for YearConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gregorian" | "365.2425" => Ok(Self::Gregorian),
            "julian" | "365.25" => Ok(Self::Julian),
            "savana" | "360" => Ok(Self::Savana),
            other => Err(format!(
                "unknown year convention '{other}' (expected gregorian, julian or savana)"
            )),
        }
    }
}

/// Traditional names of the first five dasha levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 1,
    Antardasha = 2,
    Pratyantardasha = 3,
    Sookshmadasha = 4,
    Pranadasha = 5,
}

impl DashaLevel {
    /// Level for a 1-based depth, if it has a traditional name.
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            1 => Some(Self::Mahadasha),
            2 => Some(Self::Antardasha),
            3 => Some(Self::Pratyantardasha),
            4 => Some(Self::Sookshmadasha),
            5 => Some(Self::Pranadasha),
            _ => None,
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
            Self::Sookshmadasha => "Sookshmadasha",
            Self::Pranadasha => "Pranadasha",
        }
    }
}

/// Display name for any depth; unnamed levels render as `Depth N`.
pub fn depth_name(depth: u8) -> String {
    match DashaLevel::from_depth(depth) {
        Some(level) => level.name().to_string(),
        None => format!("Depth {depth}"),
    }
}

/// Ruling grahas from the Mahadasha down to a period itself.
///
/// Fixed-capacity and `Copy`; slots past `len` are unused.
#[derive(Debug, Clone, Copy)]
pub struct Lineage {
    grahas: [Graha; MAX_DASHA_DEPTH as usize],
    len: u8,
}

impl Lineage {
    /// Lineage of a top-level period.
    pub fn root(graha: Graha) -> Self {
        Self {
            grahas: [graha; MAX_DASHA_DEPTH as usize],
            len: 1,
        }
    }

    /// Lineage extended by one child, or `None` at the depth ceiling.
    pub fn push(&self, graha: Graha) -> Option<Self> {
        let len = self.len as usize;
        if len >= MAX_DASHA_DEPTH as usize {
            return None;
        }
        let mut next = *self;
        next.grahas[len] = graha;
        next.len += 1;
        Some(next)
    }

    /// Grahas outermost first, ending with the period's own ruler.
    pub fn as_slice(&self) -> &[Graha] {
        &self.grahas[..self.len as usize]
    }

    /// Ancestor grahas only (excludes the period's own ruler).
    pub fn ancestors(&self) -> &[Graha] {
        &self.grahas[..(self.len as usize).saturating_sub(1)]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl PartialEq for Lineage {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Lineage {}

/// A single dasha period, half-open `[start_jd, end_jd)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashaPeriod {
    /// The graha ruling this period.
    pub graha: Graha,
    /// 1-based nesting depth (1 = Mahadasha).
    pub depth: u8,
    /// JD UTC, inclusive.
    pub start_jd: f64,
    /// JD UTC, exclusive.
    pub end_jd: f64,
    /// 1-indexed position among siblings.
    pub order: u16,
    /// Ruling grahas from the Mahadasha down to this period.
    pub lineage: Lineage,
}

impl DashaPeriod {
    /// Duration of the period in days.
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// Duration in years under the given day count.
    pub fn duration_years(&self, year: YearConvention) -> f64 {
        self.duration_days() / year.days_per_year()
    }

    /// Whether `jd` falls in `[start_jd, end_jd)`.
    pub fn contains(&self, jd: f64) -> bool {
        self.start_jd <= jd && jd < self.end_jd
    }

    /// Ruler of the enclosing period, `None` for a Mahadasha.
    pub fn parent_graha(&self) -> Option<Graha> {
        self.lineage.ancestors().last().copied()
    }

    /// Traditional level name, or `Depth N` past Pranadasha.
    pub fn level_name(&self) -> String {
        depth_name(self.depth)
    }
}

/// Active periods at an instant, one per depth, Mahadasha first.
#[derive(Debug, Clone, PartialEq)]
pub struct DashaSnapshot {
    /// The queried JD UTC.
    pub query_jd: f64,
    /// periods[0] = active Mahadasha, [1] = active Antardasha, etc.
    pub periods: Vec<DashaPeriod>,
}

impl DashaSnapshot {
    /// The deepest active period.
    pub fn deepest(&self) -> Option<&DashaPeriod> {
        self.periods.last()
    }
}

/// Fully materialized levels for a range of depths.
#[derive(Debug, Clone)]
pub struct DashaHierarchy {
    /// Anchor JD UTC.
    pub reference_jd: f64,
    /// levels[0] = Mahadashas, levels[1] = Antardashas, etc.
    pub levels: Vec<Vec<DashaPeriod>>,
}
