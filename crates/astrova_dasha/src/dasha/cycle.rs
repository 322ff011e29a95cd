//! The Vimshottari planet cycle: 9 grahas with year lengths summing to 120.
//!
//! The table is a `const`; its integrity is asserted at compile time and can
//! be re-checked at startup with [`validate_cycle`].

use crate::error::DashaError;
use crate::graha::Graha;

/// One slot of the planet cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleEntry {
    pub graha: Graha,
    /// Full Mahadasha length in whole years.
    pub years: u16,
}

impl CycleEntry {
    const fn new(graha: Graha, years: u16) -> Self {
        Self { graha, years }
    }
}

/// Total length of one Vimshottari cycle in years.
pub const VIMSHOTTARI_TOTAL_YEARS: u16 = 120;

/// Vimshottari order: Ketu, Shukra, Surya, Chandra, Mangal, Rahu, Guru, Shani, Buddh.
pub const VIMSHOTTARI_CYCLE: [CycleEntry; 9] = [
    CycleEntry::new(Graha::Ketu, 7),
    CycleEntry::new(Graha::Shukra, 20),
    CycleEntry::new(Graha::Surya, 6),
    CycleEntry::new(Graha::Chandra, 10),
    CycleEntry::new(Graha::Mangal, 7),
    CycleEntry::new(Graha::Rahu, 18),
    CycleEntry::new(Graha::Guru, 16),
    CycleEntry::new(Graha::Shani, 19),
    CycleEntry::new(Graha::Buddh, 17),
];

/// Sum of years over a cycle.
pub const fn cycle_total_years(cycle: &[CycleEntry]) -> u32 {
    let mut total = 0u32;
    let mut i = 0;
    while i < cycle.len() {
        total += cycle[i].years as u32;
        i += 1;
    }
    total
}

const _: () = assert!(cycle_total_years(&VIMSHOTTARI_CYCLE) == VIMSHOTTARI_TOTAL_YEARS as u32);

/// Check a cycle table: non-empty, positive years, unique grahas, sum 120.
pub fn validate_cycle(cycle: &[CycleEntry]) -> Result<(), DashaError> {
    if cycle.is_empty() {
        return Err(DashaError::InvalidConfig("cycle is empty"));
    }
    if cycle.iter().any(|e| e.years == 0) {
        return Err(DashaError::InvalidConfig("cycle contains a non-positive year length"));
    }
    for (i, a) in cycle.iter().enumerate() {
        if cycle[i + 1..].iter().any(|b| b.graha == a.graha) {
            return Err(DashaError::InvalidConfig("cycle repeats a graha"));
        }
    }
    if cycle_total_years(cycle) != VIMSHOTTARI_TOTAL_YEARS as u32 {
        return Err(DashaError::InvalidConfig("cycle years do not sum to 120"));
    }
    Ok(())
}

/// Position of a graha within the Vimshottari cycle.
pub const fn cycle_position(graha: Graha) -> usize {
    match graha {
        Graha::Ketu => 0,
        Graha::Shukra => 1,
        Graha::Surya => 2,
        Graha::Chandra => 3,
        Graha::Mangal => 4,
        Graha::Rahu => 5,
        Graha::Guru => 6,
        Graha::Shani => 7,
        Graha::Buddh => 8,
    }
}

/// Full Mahadasha length of a graha in years.
pub const fn graha_years(graha: Graha) -> u16 {
    VIMSHOTTARI_CYCLE[cycle_position(graha)].years
}

/// The cycle entry `offset` steps after `graha`, wrapping after Buddh.
pub const fn cycle_entry_after(graha: Graha, offset: usize) -> CycleEntry {
    let n = VIMSHOTTARI_CYCLE.len();
    VIMSHOTTARI_CYCLE[(cycle_position(graha) + offset) % n]
}

/// One full turn of the cycle starting with `graha` itself.
pub fn cycle_from(graha: Graha) -> impl Iterator<Item = CycleEntry> {
    (0..VIMSHOTTARI_CYCLE.len()).map(move |i| cycle_entry_after(graha, i))
}
