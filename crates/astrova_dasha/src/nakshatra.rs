//! The 27 nakshatras (lunar mansions) and longitude lookup.
//!
//! The ecliptic circle is divided into 27 equal nakshatras of 13 deg 20'
//! each, Ashwini (0) through Revati (26).

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Number of nakshatras in the 27-scheme.
pub const NAKSHATRA_COUNT: u8 = 27;

/// The 27 nakshatras from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS_27: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Nakshatra for a 0-based index, or `None` past Revati.
    pub fn from_index(index: u8) -> Option<Self> {
        ALL_NAKSHATRAS_27.get(index as usize).copied()
    }

    /// Sanskrit name of the nakshatra.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Moon position expressed as nakshatra index plus traversed fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NakshatraPosition {
    /// 0-based index (0 = Ashwini).
    pub nakshatra_index: u8,
    /// Fraction of the nakshatra already traversed, in [0, 1).
    pub progress: f64,
}

/// Nakshatra index and traversed fraction for a sidereal longitude.
pub fn nakshatra_position(sidereal_lon_deg: f64) -> NakshatraPosition {
    let lon = sidereal_lon_deg.rem_euclid(360.0);
    let nak_idx = ((lon / NAKSHATRA_SPAN_27).floor() as u8).min(NAKSHATRA_COUNT - 1);
    let degrees_in_nakshatra = lon - (nak_idx as f64) * NAKSHATRA_SPAN_27;
    // Rounding at the 360 wrap can leave the fraction at exactly 1.
    let progress = (degrees_in_nakshatra / NAKSHATRA_SPAN_27).clamp(0.0, 1.0 - f64::EPSILON);
    NakshatraPosition {
        nakshatra_index: nak_idx,
        progress,
    }
}
