use chrono::{Datelike, Utc};

use crate::config::pricing::{BASE_PRICE, MIN_PRICE_FLOOR, VARIANCE_RATIO};
use crate::pricing::catalog::*;
use crate::pricing::text_analysis::{analyze_title, title_condition_multiplier};
use crate::types::{Category, PriceEstimationInput, PriceEstimationResult, TextAnalysis};

/// Brand tiers derived from the free-text brand field. Tiers stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct BrandTier {
    premium: bool,
    streaming: bool,
    high_end: bool,
}

impl BrandTier {
    fn classify(brand: Option<&str>) -> Self {
        let Some(brand) = brand.map(str::to_lowercase).filter(|b| !b.trim().is_empty()) else {
            return Self::default();
        };
        let hit = |list: &[&str]| list.iter().any(|b| brand.contains(b));
        let streaming = hit(STREAMING_BRANDS);
        Self {
            premium: hit(PREMIUM_BRANDS),
            streaming,
            high_end: !streaming && hit(HIGH_END_BRANDS),
        }
    }
}

/// Suggest a price for a listing, ageing it against the current year.
pub fn estimate(input: &PriceEstimationInput) -> PriceEstimationResult {
    estimate_at(input, Utc::now().year())
}

/// Suggest a price for a listing, treating `reference_year` as "now".
pub fn estimate_at(input: &PriceEstimationInput, reference_year: i32) -> PriceEstimationResult {
    let title = input.title.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let analysis = title.map(|t| analyze_title(t, reference_year));

    let mut base_price = BASE_PRICE;

    if let Some(a) = &analysis {
        base_price *= title_multiplier(a);
    }

    // Category replaces everything the title analysis contributed.
    if let Some(category) = input.category {
        base_price = category_base_price(category);
    }

    let tier = BrandTier::classify(input.brand.as_deref());
    if tier.premium {
        base_price *= PREMIUM_MULTIPLIER;
    }
    if tier.streaming {
        base_price *= if input.category == Some(Category::Multiroom) {
            STREAMING_MULTIROOM_MULTIPLIER
        } else {
            STREAMING_MULTIPLIER
        };
    }
    if tier.high_end {
        base_price *= HIGH_END_MULTIPLIER;
    }

    let age = input.year.map(|year| (reference_year - year).max(0));
    if let Some(age) = age {
        base_price *= age_multiplier(tier, age);
    }

    if let Some(condition) = input.condition {
        base_price *= condition_multiplier(condition);
    } else if let Some(m) = analysis
        .as_ref()
        .and_then(|a| a.condition)
        .and_then(title_condition_multiplier)
    {
        base_price *= m;
    }

    if input.has_amplifier {
        base_price *= AMPLIFIER_MULTIPLIER;
    }
    if input.has_turntable {
        base_price *= TURNTABLE_MULTIPLIER;
    }
    if input.has_tonearm {
        base_price *= TONEARM_MULTIPLIER;
    }
    if input.is_digital {
        base_price *= DIGITAL_MULTIPLIER;
    }

    let variance = base_price * VARIANCE_RATIO;
    let recommended_price = base_price.round() as i64;
    let max_price = (base_price + variance).round() as i64;
    let min_price = ((base_price - variance).round() as i64)
        .max(MIN_PRICE_FLOOR)
        .min(recommended_price);

    PriceEstimationResult {
        min_price,
        max_price,
        recommended_price,
        confidence: confidence(input, title),
        reasoning: reasoning(input, tier, age, analysis.as_ref()),
        analysis,
    }
}

/// Combined wattage, vintage, feature and size multiplier for a title.
fn title_multiplier(a: &TextAnalysis) -> f64 {
    let mut m = 1.0;
    if a.wattage > 0 {
        m *= wattage_multiplier(a.wattage);
    }
    if a.is_vintage {
        m *= VINTAGE_MULTIPLIER;
    }
    for feature in &a.features {
        m *= feature_multiplier(*feature);
    }
    if let Some(size) = a.size {
        m *= size_multiplier(size);
    }
    m
}

fn wattage_multiplier(watts: u32) -> f64 {
    WATTAGE_BANDS
        .iter()
        .find(|(max, _)| watts <= *max)
        .map(|(_, m)| *m)
        .unwrap_or(WATTAGE_TOP)
}

fn age_multiplier(tier: BrandTier, age: i32) -> f64 {
    let (bands, floor) = if tier.streaming {
        STREAMING_DECAY
    } else if tier.high_end {
        HIGH_END_DECAY
    } else {
        STANDARD_DECAY
    };
    bands
        .iter()
        .find(|(max_age, _)| age <= *max_age)
        .map(|(_, m)| *m)
        .unwrap_or(floor)
}

fn confidence(input: &PriceEstimationInput, title: Option<&str>) -> u8 {
    let has_brand = input.brand.as_deref().is_some_and(|b| !b.trim().is_empty());
    let mut confidence = 70;
    if has_brand && input.condition.is_some() && input.year.is_some() {
        confidence = if input.has_amplifier || input.has_turntable {
            90
        } else {
            85
        };
    }
    if title.is_some_and(|t| t.chars().count() > 10) {
        confidence += 5;
    }
    confidence
}

fn reasoning(
    input: &PriceEstimationInput,
    tier: BrandTier,
    age: Option<i32>,
    analysis: Option<&TextAnalysis>,
) -> String {
    let mut text = match input.category {
        Some(category) => format!("Baserat på marknadspriser för {category}."),
        None => "Baserat på marknadspriser för begagnad HiFi.".to_string(),
    };

    if tier.premium {
        text.push_str(" Premiummärke höjer värdet.");
    }
    if tier.high_end {
        text.push_str(" Etablerat high-end-märke.");
    }
    if tier.streaming {
        text.push_str(" Streamingprodukt, värdet följer mjukvarustödet.");
    }
    if let Some(age) = age {
        text.push_str(&format!(" Ålder: {age} år."));
    }

    if let Some(a) = analysis {
        if a.wattage > 0 {
            text.push_str(&format!(" Effekt: {}W.", a.wattage));
        }
        if a.is_vintage {
            text.push_str(" Vintage-utrustning.");
        }
        if !a.features.is_empty() {
            let names: Vec<&str> = a.features.iter().map(|f| f.label()).collect();
            text.push_str(&format!(" Egenskaper: {}.", names.join(", ")));
        }
        if let Some(size) = a.size {
            text.push_str(&format!(" Typ: {}.", size.label()));
        }
    }

    let components: Vec<&str> = [
        (input.has_amplifier, "förstärkare"),
        (input.has_turntable, "skivspelare"),
        (input.has_tonearm, "tonarm"),
        (input.is_digital, "digital"),
    ]
    .into_iter()
    .filter_map(|(present, name)| present.then_some(name))
    .collect();
    if !components.is_empty() {
        text.push_str(&format!(" Inkluderar: {}.", components.join(", ")));
    }

    if tier.high_end && age.is_some() {
        text.push_str(" (high-end behåller värdet)");
    }
    if let Some(a) = analysis {
        text.push_str(" (AI-analys av titeln)");
        if a.wattage > 0 && !a.features.is_empty() {
            text.push_str(" (detaljerad specifikationsanalys)");
        }
        if a.is_vintage && age.is_some() {
            text.push_str(" (verifierad vintage)");
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Condition;

    const YEAR: i32 = 2026;

    fn input() -> PriceEstimationInput {
        PriceEstimationInput::default()
    }

    fn assert_range_invariants(r: &PriceEstimationResult) {
        assert!(r.min_price <= r.recommended_price, "{r:?}");
        assert!(r.recommended_price <= r.max_price, "{r:?}");
        assert!(r.confidence <= 95);
    }

    #[test]
    fn empty_input_returns_base_price() {
        let r = estimate_at(&input(), YEAR);
        assert_eq!(r.recommended_price, 5000);
        assert_eq!(r.min_price, 3500);
        assert_eq!(r.max_price, 6500);
        assert_eq!(r.confidence, 70);
        assert!(r.analysis.is_none());
        assert_eq!(r.reasoning, "Baserat på marknadspriser för begagnad HiFi.");
    }

    #[test]
    fn category_alone_yields_category_constant() {
        for category in Category::ALL {
            let r = estimate_at(
                &PriceEstimationInput {
                    category: Some(category),
                    ..input()
                },
                YEAR,
            );
            assert_eq!(r.recommended_price as f64, category_base_price(category));
            assert_range_invariants(&r);
        }
    }

    #[test]
    fn category_overrides_title_multipliers() {
        let r = estimate_at(
            &PriceEstimationInput {
                title: Some("Marantz 2270 100W Vintage Tube Receiver".to_string()),
                category: Some(Category::Amplifier),
                ..input()
            },
            YEAR,
        );
        assert_eq!(r.recommended_price, 18000);
        // Analysis still runs and shows up in the reasoning.
        assert!(r.reasoning.contains("Effekt: 100W."));
    }

    #[test]
    fn title_multipliers_compound_without_category() {
        let r = estimate_at(
            &PriceEstimationInput {
                title: Some("Marantz 2270 100W Vintage Tube Receiver".to_string()),
                ..input()
            },
            YEAR,
        );
        assert_eq!(r.recommended_price, 9750);
        assert_eq!(r.confidence, 75);
        assert!(r.reasoning.contains("Egenskaper: rörteknik."));
        assert!(r.reasoning.contains("(detaljerad specifikationsanalys)"));
        assert!(!r.reasoning.contains("(verifierad vintage)"));
    }

    #[test]
    fn wattage_bands() {
        assert_eq!(wattage_multiplier(10), 0.8);
        assert_eq!(wattage_multiplier(11), 0.9);
        assert_eq!(wattage_multiplier(50), 1.0);
        assert_eq!(wattage_multiplier(100), 1.3);
        assert_eq!(wattage_multiplier(200), 1.6);
        assert_eq!(wattage_multiplier(201), 2.0);
    }

    #[test]
    fn brand_tiers_stack() {
        let tier = BrandTier::classify(Some("McIntosh"));
        assert!(tier.premium && tier.high_end && !tier.streaming);

        // Streaming classification suppresses the high-end bonus.
        let tier = BrandTier::classify(Some("Yamaha MusicCast"));
        assert!(tier.streaming && !tier.high_end);

        let r = estimate_at(
            &PriceEstimationInput {
                brand: Some("McIntosh".to_string()),
                category: Some(Category::Amplifier),
                ..input()
            },
            YEAR,
        );
        assert_eq!(r.recommended_price, (18000.0_f64 * 1.4 * 1.2).round() as i64);
    }

    #[test]
    fn streaming_bonus_depends_on_multiroom_category() {
        let sonos = |category| {
            estimate_at(
                &PriceEstimationInput {
                    brand: Some("Sonos".to_string()),
                    category: Some(category),
                    ..input()
                },
                YEAR,
            )
            .recommended_price
        };
        assert_eq!(sonos(Category::Multiroom), 3675);
        assert_eq!(sonos(Category::Speaker), 12500);
    }

    #[test]
    fn age_curves_follow_brand_tier() {
        let streaming = BrandTier { streaming: true, ..BrandTier::default() };
        let high_end = BrandTier { high_end: true, ..BrandTier::default() };
        let other = BrandTier::default();

        assert_eq!(age_multiplier(streaming, 0), 0.95);
        assert_eq!(age_multiplier(streaming, 8), 0.55);
        assert_eq!(age_multiplier(streaming, 9), 0.45);
        assert_eq!(age_multiplier(high_end, 20), 0.50);
        assert_eq!(age_multiplier(high_end, 21), 0.35);
        assert_eq!(age_multiplier(other, 2), 0.85);
        assert_eq!(age_multiplier(other, 11), 0.35);
    }

    #[test]
    fn future_year_counts_as_new() {
        let r = estimate_at(
            &PriceEstimationInput {
                year: Some(YEAR + 3),
                ..input()
            },
            YEAR,
        );
        assert_eq!(r.recommended_price, 4250);
        assert!(r.reasoning.contains("Ålder: 0 år."));
    }

    #[test]
    fn explicit_condition_beats_title_condition() {
        let title = Some("Technics SL-1200 defekt".to_string());
        let detected = estimate_at(
            &PriceEstimationInput {
                title: title.clone(),
                ..input()
            },
            YEAR,
        );
        assert_eq!(detected.recommended_price, 1500);

        let explicit = estimate_at(
            &PriceEstimationInput {
                title,
                condition: Some(Condition::Excellent),
                ..input()
            },
            YEAR,
        );
        assert_eq!(explicit.recommended_price, 4500);
    }

    #[test]
    fn components_adjust_price() {
        let r = estimate_at(
            &PriceEstimationInput {
                has_amplifier: true,
                has_turntable: true,
                has_tonearm: true,
                is_digital: true,
                ..input()
            },
            YEAR,
        );
        assert_eq!(
            r.recommended_price,
            (5000.0_f64 * 1.3 * 1.2 * 1.15 * 0.9).round() as i64
        );
        assert!(r
            .reasoning
            .contains("Inkluderar: förstärkare, skivspelare, tonarm, digital."));
    }

    #[test]
    fn min_price_floor_never_exceeds_recommendation() {
        let r = estimate_at(
            &PriceEstimationInput {
                category: Some(Category::Accessory),
                condition: Some(Condition::Poor),
                year: Some(1990),
                ..input()
            },
            YEAR,
        );
        // 2000 * 0.35 * 0.30 = 210
        assert_eq!(r.recommended_price, 210);
        assert_eq!(r.min_price, 210);
        assert_range_invariants(&r);

        let r = estimate_at(
            &PriceEstimationInput {
                category: Some(Category::Accessory),
                year: Some(1990),
                ..input()
            },
            YEAR,
        );
        // 2000 * 0.35 = 700, unclipped min would be 490
        assert_eq!(r.recommended_price, 700);
        assert_eq!(r.min_price, 500);
        assert_eq!(r.max_price, 910);
    }

    #[test]
    fn range_is_symmetric_when_floor_does_not_clip() {
        let r = estimate_at(
            &PriceEstimationInput {
                category: Some(Category::Receiver),
                ..input()
            },
            YEAR,
        );
        assert_eq!(r.max_price - r.recommended_price, r.recommended_price - r.min_price);
    }

    #[test]
    fn confidence_grows_with_detail() {
        let mut i = input();
        let mut last = estimate_at(&i, YEAR).confidence;
        assert_eq!(last, 70);

        i.brand = Some("Luxman".to_string());
        i.condition = Some(Condition::VeryGood);
        i.year = Some(1979);
        let c = estimate_at(&i, YEAR).confidence;
        assert_eq!(c, 85);
        assert!(c >= last);
        last = c;

        i.has_turntable = true;
        let c = estimate_at(&i, YEAR).confidence;
        assert_eq!(c, 90);
        assert!(c >= last);
        last = c;

        i.title = Some("Luxman PD-264 direktdriven".to_string());
        let r = estimate_at(&i, YEAR);
        assert_eq!(r.confidence, 95);
        assert!(r.confidence >= last);
        assert!(r.reasoning.contains("(high-end behåller värdet)"));
    }

    #[test]
    fn short_title_does_not_raise_confidence() {
        let r = estimate_at(
            &PriceEstimationInput {
                title: Some("NAD 3020".to_string()),
                ..input()
            },
            YEAR,
        );
        assert_eq!(r.confidence, 70);
    }

    #[test]
    fn vintage_with_year_is_verified() {
        let r = estimate_at(
            &PriceEstimationInput {
                title: Some("Sansui AU-717 vintage".to_string()),
                year: Some(1978),
                ..input()
            },
            YEAR,
        );
        assert!(r.reasoning.contains("Vintage-utrustning."));
        assert!(r.reasoning.contains("(verifierad vintage)"));
    }
}
