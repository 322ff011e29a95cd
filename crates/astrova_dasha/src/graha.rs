//! Vedic planet (graha) enum.
//!
//! The 9 grahas that rule Vimshottari dasha periods. Their dasha order and
//! year lengths live in [`crate::dasha::cycle`]; this module only names them.

use std::str::FromStr;

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// English name of the graha.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// 0-based index into ALL_GRAHAS.
    pub const fn index(self) -> u8 {
        match self {
            Self::Surya => 0,
            Self::Chandra => 1,
            Self::Mangal => 2,
            Self::Buddh => 3,
            Self::Guru => 4,
            Self::Shukra => 5,
            Self::Shani => 6,
            Self::Rahu => 7,
            Self::Ketu => 8,
        }
    }
}

impl std::fmt::Display for Graha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.english_name())
    }
}

/// Error returned when a graha name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGraha(pub String);

impl std::fmt::Display for UnknownGraha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown graha '{}'", self.0)
    }
}

impl std::error::Error for UnknownGraha {}

impl FromStr for Graha {
    type Err = UnknownGraha;

    /// Accepts Sanskrit or English names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let matches = |g: &Graha| {
            g.name().eq_ignore_ascii_case(name) || g.english_name().eq_ignore_ascii_case(name)
        };
        ALL_GRAHAS
            .into_iter()
            .find(matches)
            .ok_or_else(|| UnknownGraha(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_grahas_count() {
        assert_eq!(ALL_GRAHAS.len(), 9);
    }

    #[test]
    fn graha_indices_sequential() {
        for (i, g) in ALL_GRAHAS.iter().enumerate() {
            assert_eq!(g.index() as usize, i);
        }
    }

    #[test]
    fn parse_either_name() {
        assert_eq!("Shukra".parse::<Graha>(), Ok(Graha::Shukra));
        assert_eq!("venus".parse::<Graha>(), Ok(Graha::Shukra));
        assert_eq!(" KETU ".parse::<Graha>(), Ok(Graha::Ketu));
        assert!("Pluto".parse::<Graha>().is_err());
    }

    #[test]
    fn display_is_english() {
        assert_eq!(Graha::Buddh.to_string(), "Mercury");
    }
}
