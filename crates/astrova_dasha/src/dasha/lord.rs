//! Nakshatra lord resolution.
//!
//! The 27 nakshatras map onto the 9-graha cycle in three passes:
//! `lord(i) == VIMSHOTTARI_CYCLE[i % 9]`.

use crate::error::DashaError;
use crate::graha::Graha;
use crate::nakshatra::NAKSHATRA_COUNT;

use super::cycle::VIMSHOTTARI_CYCLE;

/// Ruling graha of a nakshatra and its slot in the planet cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NakshatraLord {
    pub graha: Graha,
    /// Index of `graha` within `VIMSHOTTARI_CYCLE`.
    pub cycle_offset: u8,
    /// Full Mahadasha length of `graha` in years.
    pub years: u16,
}

/// Resolve the Vimshottari lord of a nakshatra (0 = Ashwini .. 26 = Revati).
pub fn nakshatra_lord(nakshatra_index: u8) -> Result<NakshatraLord, DashaError> {
    if nakshatra_index >= NAKSHATRA_COUNT {
        return Err(DashaError::InvalidNakshatraIndex(nakshatra_index));
    }
    let offset = nakshatra_index as usize % VIMSHOTTARI_CYCLE.len();
    let entry = VIMSHOTTARI_CYCLE[offset];
    Ok(NakshatraLord {
        graha: entry.graha,
        cycle_offset: offset as u8,
        years: entry.years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dasha::cycle::cycle_position;

    #[test]
    fn ashwini_magha_mula_are_ketu() {
        for idx in [0, 9, 18] {
            assert_eq!(nakshatra_lord(idx).unwrap().graha, Graha::Ketu);
        }
    }

    #[test]
    fn ashlesha_is_buddh() {
        let lord = nakshatra_lord(8).unwrap();
        assert_eq!(lord.graha, Graha::Buddh);
        assert_eq!(lord.cycle_offset, 8);
        assert_eq!(lord.years, 17);
    }

    #[test]
    fn offset_matches_cycle_position() {
        for idx in 0..27 {
            let lord = nakshatra_lord(idx).unwrap();
            assert_eq!(lord.cycle_offset as usize, cycle_position(lord.graha));
            assert_eq!(lord.cycle_offset, idx % 9);
        }
    }

    #[test]
    fn revati_is_last_valid() {
        assert_eq!(nakshatra_lord(26).unwrap().graha, Graha::Buddh);
        assert_eq!(
            nakshatra_lord(27),
            Err(DashaError::InvalidNakshatraIndex(27))
        );
    }
}
