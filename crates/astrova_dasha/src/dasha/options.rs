//! Options controlling how much of the dasha tree is generated.

use crate::error::DashaError;

use super::types::{DEFAULT_DASHA_DEPTH, MAX_DASHA_DEPTH, MAX_TOP_LEVEL_PERIODS, YearConvention};

/// Generation options for a dasha timeline.
///
/// Without a horizon, exactly one 120-year cycle is generated, measured from
/// the nominal start of the first Mahadasha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashaOptions {
    /// Deepest level that may be subdivided into (1 = Mahadasha only).
    pub max_depth: u8,
    /// Generate Mahadashas until this JD UTC is covered.
    pub horizon_jd: Option<f64>,
    /// Upper bound on generated Mahadashas.
    pub max_top_level_periods: Option<usize>,
    /// Day count for converting years to calendar time.
    pub year: YearConvention,
}

impl Default for DashaOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DASHA_DEPTH,
            horizon_jd: None,
            max_top_level_periods: None,
            year: YearConvention::default(),
        }
    }
}

impl DashaOptions {
    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_horizon_jd(mut self, horizon_jd: f64) -> Self {
        self.horizon_jd = Some(horizon_jd);
        self
    }

    pub fn with_max_top_level_periods(mut self, n: usize) -> Self {
        self.max_top_level_periods = Some(n);
        self
    }

    pub fn with_year(mut self, year: YearConvention) -> Self {
        self.year = year;
        self
    }

    /// Effective Mahadasha cap.
    pub fn period_cap(&self) -> usize {
        self.max_top_level_periods.unwrap_or(MAX_TOP_LEVEL_PERIODS)
    }

    /// Reject depths outside `1..=MAX_DASHA_DEPTH` and degenerate limits.
    pub fn validate(&self) -> Result<(), DashaError> {
        check_depth(self.max_depth, MAX_DASHA_DEPTH)?;
        if let Some(h) = self.horizon_jd {
            if !h.is_finite() {
                return Err(DashaError::InvalidConfig("horizon must be a finite JD"));
            }
        }
        match self.max_top_level_periods {
            Some(0) => Err(DashaError::InvalidConfig(
                "max_top_level_periods must be at least 1",
            )),
            Some(n) if n > MAX_TOP_LEVEL_PERIODS => Err(DashaError::InvalidConfig(
                "max_top_level_periods exceeds MAX_TOP_LEVEL_PERIODS",
            )),
            _ => Ok(()),
        }
    }
}

/// Depth must be at least 1 and at most `max`.
pub fn check_depth(depth: u8, max: u8) -> Result<(), DashaError> {
    if depth == 0 {
        return Err(DashaError::InvalidDepth(depth));
    }
    if depth > max {
        return Err(DashaError::DepthExceeded {
            requested: depth,
            max,
        });
    }
    Ok(())
}
