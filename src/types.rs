use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Marketplace vocabulary
// ---------------------------------------------------------------------------

/// Fixed listing categories. Wire names are the marketplace's Swedish ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "forstarkare", alias = "förstärkare")]
    Amplifier,
    #[serde(rename = "hogtalare", alias = "högtalare")]
    Speaker,
    #[serde(rename = "skivspelare")]
    Turntable,
    #[serde(rename = "receiver")]
    Receiver,
    #[serde(rename = "rorforstarkare", alias = "rörförstärkare")]
    TubeAmplifier,
    #[serde(rename = "multiroom")]
    Multiroom,
    #[serde(rename = "cd_spelare", alias = "cd-spelare")]
    CdPlayer,
    #[serde(rename = "kassettdack", alias = "kassettdäck")]
    CassetteDeck,
    #[serde(rename = "tillbehor", alias = "tillbehör")]
    Accessory,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Amplifier,
        Category::Speaker,
        Category::Turntable,
        Category::Receiver,
        Category::TubeAmplifier,
        Category::Multiroom,
        Category::CdPlayer,
        Category::CassetteDeck,
        Category::Accessory,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Amplifier => "förstärkare",
            Category::Speaker => "högtalare",
            Category::Turntable => "skivspelare",
            Category::Receiver => "receiver",
            Category::TubeAmplifier => "rörförstärkare",
            Category::Multiroom => "multiroom",
            Category::CdPlayer => "cd-spelare",
            Category::CassetteDeck => "kassettdäck",
            Category::Accessory => "tillbehör",
        };
        write!(f, "{s}")
    }
}

/// Seller-declared condition, graded on the record-collector scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Mint,
    NearMint,
    Excellent,
    VeryGoodPlus,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Condition::Mint => "mint",
            Condition::NearMint => "near_mint",
            Condition::Excellent => "excellent",
            Condition::VeryGoodPlus => "very_good_plus",
            Condition::VeryGood => "very_good",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
        };
        write!(f, "{s}")
    }
}

/// Technical features picked out of a listing title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Tube,
    Phono,
    ClassA,
    Balanced,
    Mosfet,
    Electrostatic,
}

impl Feature {
    /// Display name used in the reasoning text.
    pub fn label(self) -> &'static str {
        match self {
            Feature::Tube => "rörteknik",
            Feature::Phono => "phonosteg",
            Feature::ClassA => "klass A",
            Feature::Balanced => "balanserade XLR-anslutningar",
            Feature::Mosfet => "MOSFET-slutsteg",
            Feature::Electrostatic => "elektrostatiska element",
        }
    }
}

/// Speaker cabinet size picked out of a listing title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Tower,
    Bookshelf,
    Mini,
    Subwoofer,
}

impl SizeClass {
    pub fn label(self) -> &'static str {
        match self {
            SizeClass::Tower => "golvhögtalare",
            SizeClass::Bookshelf => "stativhögtalare",
            SizeClass::Mini => "kompakthögtalare",
            SizeClass::Subwoofer => "subwoofer",
        }
    }
}

// ---------------------------------------------------------------------------
// Price estimation
// ---------------------------------------------------------------------------

/// Form state submitted when a seller asks for a price suggestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceEstimationInput {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    /// Manufacture year.
    pub year: Option<i32>,
    pub has_amplifier: bool,
    pub has_turntable: bool,
    pub has_tonearm: bool,
    pub is_digital: bool,
}

/// What the title analysis found. Derived fresh for every estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextAnalysis {
    /// Output power in watts, 0 when the title names none.
    pub wattage: u32,
    pub is_vintage: bool,
    /// Matched condition keyword, e.g. "mycket bra".
    pub condition: Option<&'static str>,
    pub features: Vec<Feature>,
    pub size: Option<SizeClass>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceEstimationResult {
    pub min_price: i64,
    pub max_price: i64,
    pub recommended_price: i64,
    /// 0–100.
    pub confidence: u8,
    pub reasoning: String,
    pub analysis: Option<TextAnalysis>,
}

// ---------------------------------------------------------------------------
// Gamification
// ---------------------------------------------------------------------------

/// Aggregate activity counters for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserActivityStats {
    pub total_listings: u32,
    pub total_sales: u32,
    pub total_purchases: u32,
    pub average_rating: f64,
}

/// Unlock rule for a badge. Evaluated against a single stats snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "threshold", rename_all = "snake_case")]
pub enum BadgeRule {
    MinListings(u32),
    MinSales(u32),
    MinPurchases(u32),
    MinRating(f64),
    /// Account older than this many days.
    AccountAgeDays(i64),
    /// Reserved for the forum; nothing can unlock it yet.
    Never,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rule: BadgeRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    Listing,
    Sale,
    Purchase,
    Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: AchievementKind,
    pub requirement: u32,
    /// Shown next to the achievement; not added to the point total.
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeStatus {
    #[serde(flatten)]
    pub badge: &'static Badge,
    pub unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementStatus {
    #[serde(flatten)]
    pub achievement: &'static Achievement,
    pub unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GamificationResult {
    pub level: u32,
    pub points: u64,
    pub next_level_points: u64,
    /// Percent of the way to the next level, in [0, 100).
    pub progress: f64,
    pub badges: Vec<BadgeStatus>,
    pub achievements: Vec<AchievementStatus>,
}

impl GamificationResult {
    pub fn unlocked_badges(&self) -> impl Iterator<Item = &'static Badge> + '_ {
        self.badges.iter().filter(|b| b.unlocked).map(|b| b.badge)
    }

    pub fn unlocked_achievements(&self) -> impl Iterator<Item = &'static Achievement> + '_ {
        self.achievements
            .iter()
            .filter(|a| a.unlocked)
            .map(|a| a.achievement)
    }
}
