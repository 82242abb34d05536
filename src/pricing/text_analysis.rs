use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::pricing::VINTAGE_AGE_YEARS;
use crate::pricing::catalog::{
    FEATURE_PATTERNS, SIZE_KEYWORDS, TITLE_CONDITIONS, VINTAGE_KEYWORDS, WATTAGE_PATTERNS,
    YEAR_PATTERN,
};
use crate::types::{Feature, TextAnalysis};

static WATTAGE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    WATTAGE_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

static FEATURE_RES: Lazy<Vec<(Feature, Regex)>> = Lazy::new(|| {
    FEATURE_PATTERNS
        .iter()
        .filter_map(|(feature, p)| Regex::new(p).ok().map(|re| (*feature, re)))
        .collect()
});

static YEAR_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(YEAR_PATTERN).ok());

/// Pull wattage, vintage status, condition, features and size out of a
/// free-text listing title. Matching is case-insensitive.
pub fn analyze_title(title: &str, reference_year: i32) -> TextAnalysis {
    let lower = title.to_lowercase();

    TextAnalysis {
        wattage: detect_wattage(&lower),
        is_vintage: detect_vintage(&lower, reference_year),
        condition: TITLE_CONDITIONS
            .iter()
            .find(|(kw, _)| lower.contains(kw))
            .map(|(kw, _)| *kw),
        features: FEATURE_RES
            .iter()
            .filter(|(_, re)| re.is_match(&lower))
            .map(|(feature, _)| *feature)
            .collect(),
        size: SIZE_KEYWORDS
            .iter()
            .find(|(_, kws)| kws.iter().any(|kw| lower.contains(kw)))
            .map(|(size, _)| *size),
    }
}

/// Multiplier for a condition keyword returned by [`analyze_title`].
pub fn title_condition_multiplier(keyword: &str) -> Option<f64> {
    TITLE_CONDITIONS
        .iter()
        .find(|(kw, _)| *kw == keyword)
        .map(|(_, m)| *m)
}

fn detect_wattage(lower: &str) -> u32 {
    WATTAGE_RES
        .iter()
        .find_map(|re| re.captures(lower))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}

fn detect_vintage(lower: &str, reference_year: i32) -> bool {
    let old_year = (*YEAR_RE).as_ref().is_some_and(|re| {
        re.captures_iter(lower)
            .filter_map(|c| c.get(1)?.as_str().parse::<i32>().ok())
            .any(|year| reference_year - year > VINTAGE_AGE_YEARS)
    });
    old_year || VINTAGE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
