//! Lookup tables for the price heuristic: keyword dictionaries, brand lists
//! and multiplier bands. Order matters wherever a table is scanned
//! first-match-wins.

use crate::types::{Category, Condition, Feature, SizeClass};

// ---------------------------------------------------------------------------
// Title keywords
// ---------------------------------------------------------------------------

/// Power patterns, tried in order; the first one that matches decides.
pub const WATTAGE_PATTERNS: &[&str] = &[
    r"(\d{1,4})\s*w(?:att)?s?\s*(?:rms|per kanal|/kanal|per channel|x\s*2)",
    r"2\s*x\s*(\d{1,4})\s*w(?:att)?",
    r"(\d{1,4})\s*w(?:att)?s?\b",
];

/// Standalone 4-digit year in a title.
pub const YEAR_PATTERN: &str = r"\b(19[5-9]\d|20\d{2})\b";

pub const VINTAGE_KEYWORDS: &[&str] = &[
    "vintage", "retro", "klassisk", "classic", "60-tal", "70-tal", "80-tal", "70s", "80s",
];

/// Condition words found in titles, highest priority first, with their multiplier.
pub const TITLE_CONDITIONS: &[(&str, f64)] = &[
    ("nyskick", 0.98),
    ("mint", 0.98),
    ("perfekt", 0.92),
    ("mycket bra", 0.85),
    ("very good", 0.85),
    ("bra skick", 0.75),
    ("good", 0.75),
    ("begagnad", 0.65),
    ("sliten", 0.50),
    ("worn", 0.50),
    ("defekt", 0.30),
    ("trasig", 0.30),
    ("broken", 0.30),
];

/// Regexes over the lowercased title. Class A is bounded on both sides so a
/// "class AB" title does not match.
pub const FEATURE_PATTERNS: &[(Feature, &str)] = &[
    (Feature::Tube, r"tube|rör|valve"),
    (Feature::Phono, r"phono|riaa"),
    (Feature::ClassA, r"\b(?:class|klass)[- ]?a\b"),
    (Feature::Balanced, r"balanced|balanserad|xlr"),
    (Feature::Mosfet, r"mosfet"),
    (Feature::Electrostatic, r"electrostatic|elektrostat"),
];

pub const SIZE_KEYWORDS: &[(SizeClass, &[&str])] = &[
    (SizeClass::Tower, &["tower", "floorstanding", "golvhögtalare", "golvstående"]),
    (SizeClass::Bookshelf, &["bookshelf", "standmount", "stativhögtalare", "bokhylla"]),
    (SizeClass::Mini, &["mini", "compact", "kompakt"]),
    (SizeClass::Subwoofer, &["subwoofer"]),
];

// ---------------------------------------------------------------------------
// Brands (lowercase, matched by substring containment)
// ---------------------------------------------------------------------------

pub const PREMIUM_BRANDS: &[&str] = &[
    "mcintosh",
    "accuphase",
    "krell",
    "mark levinson",
    "audio research",
    "naim",
    "linn",
    "bang & olufsen",
    "b&o",
    "quad",
    "luxman",
];

pub const STREAMING_BRANDS: &[&str] = &["sonos", "bluesound", "heos", "musiccast", "bose"];

pub const HIGH_END_BRANDS: &[&str] = &[
    "mcintosh",
    "accuphase",
    "krell",
    "mark levinson",
    "audio research",
    "naim",
    "linn",
    "luxman",
    "quad",
    "marantz",
    "sansui",
    "pioneer",
    "technics",
    "yamaha",
    "kenwood",
    "harman kardon",
    "tannoy",
    "klipsch",
    "jbl",
    "bowers",
    "b&w",
    "dynaudio",
    "thorens",
    "garrard",
];

// ---------------------------------------------------------------------------
// Multipliers
// ---------------------------------------------------------------------------

/// (upper bound in watts inclusive, multiplier). Above the last bound: `WATTAGE_TOP`.
pub const WATTAGE_BANDS: &[(u32, f64)] = &[(10, 0.8), (25, 0.9), (50, 1.0), (100, 1.3), (200, 1.6)];
pub const WATTAGE_TOP: f64 = 2.0;

pub const VINTAGE_MULTIPLIER: f64 = 1.2;

pub fn feature_multiplier(feature: Feature) -> f64 {
    match feature {
        Feature::Tube => 1.25,
        Feature::Phono => 1.1,
        Feature::ClassA => 1.15,
        Feature::Balanced => 1.1,
        Feature::Mosfet => 1.05,
        Feature::Electrostatic => 1.3,
    }
}

pub fn size_multiplier(size: SizeClass) -> f64 {
    match size {
        SizeClass::Tower => 1.15,
        SizeClass::Bookshelf => 1.05,
        SizeClass::Mini => 0.9,
        SizeClass::Subwoofer => 1.1,
    }
}

/// Market price a category starts from. Replaces, rather than scales, the
/// title-derived base.
pub fn category_base_price(category: Category) -> f64 {
    match category {
        Category::Amplifier => 18000.0,
        Category::Speaker => 10000.0,
        Category::Turntable => 4000.0,
        Category::Receiver => 15000.0,
        Category::TubeAmplifier => 25000.0,
        Category::Multiroom => 3500.0,
        Category::CdPlayer => 3000.0,
        Category::CassetteDeck => 2500.0,
        Category::Accessory => 2000.0,
    }
}

pub const PREMIUM_MULTIPLIER: f64 = 1.4;
pub const STREAMING_MULTIROOM_MULTIPLIER: f64 = 1.05;
pub const STREAMING_MULTIPLIER: f64 = 1.25;
pub const HIGH_END_MULTIPLIER: f64 = 1.2;

/// Age decay bands: (max age in years inclusive, multiplier), then the floor.
pub const STREAMING_DECAY: (&[(i32, f64)], f64) =
    (&[(1, 0.95), (3, 0.85), (5, 0.70), (8, 0.55)], 0.45);
pub const HIGH_END_DECAY: (&[(i32, f64)], f64) =
    (&[(5, 0.90), (10, 0.80), (15, 0.65), (20, 0.50)], 0.35);
pub const STANDARD_DECAY: (&[(i32, f64)], f64) = (&[(2, 0.85), (5, 0.65), (10, 0.50)], 0.35);

pub fn condition_multiplier(condition: Condition) -> f64 {
    match condition {
        Condition::Mint => 0.98,
        Condition::NearMint => 0.95,
        Condition::Excellent => 0.90,
        Condition::VeryGoodPlus => 0.85,
        Condition::VeryGood => 0.75,
        Condition::Good => 0.60,
        Condition::Fair => 0.45,
        Condition::Poor => 0.30,
    }
}

pub const AMPLIFIER_MULTIPLIER: f64 = 1.3;
pub const TURNTABLE_MULTIPLIER: f64 = 1.2;
pub const TONEARM_MULTIPLIER: f64 = 1.15;
pub const DIGITAL_MULTIPLIER: f64 = 0.9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_condition_priority_checks_longer_phrases_first() {
        let pos = |kw: &str| TITLE_CONDITIONS.iter().position(|(k, _)| *k == kw).unwrap();
        assert!(pos("very good") < pos("good"));
        assert!(pos("mycket bra") < pos("bra skick"));
    }

    #[test]
    fn wattage_bands_are_ascending() {
        assert!(WATTAGE_BANDS.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(WATTAGE_BANDS.len() + 1, 6);
    }

    #[test]
    fn premium_brands_are_also_high_end_or_design_labels() {
        for brand in PREMIUM_BRANDS {
            let design_label = matches!(*brand, "bang & olufsen" | "b&o");
            assert!(design_label || HIGH_END_BRANDS.contains(brand), "{brand}");
        }
    }
}
