use crate::error::{AppError, Result};

/// Channel capacity for the estimate recorder.
pub const CHANNEL_CAPACITY: usize = 1024;

/// Upper bound for `/estimates/recent?limit=`.
pub const MAX_RECENT_ESTIMATES: i64 = 500;

/// Oldest manufacture year accepted by the API.
pub const MIN_MANUFACTURE_YEAR: i32 = 1900;

/// Price heuristic constants (whole SEK).
pub mod pricing {
    /// Starting point before any title, category or brand adjustment.
    pub const BASE_PRICE: f64 = 5000.0;
    /// Half-width of the suggested range, as a fraction of the recommendation.
    pub const VARIANCE_RATIO: f64 = 0.3;
    /// No suggested minimum goes below this.
    pub const MIN_PRICE_FLOOR: i64 = 500;
    /// A 4-digit year in the title older than this marks the item as vintage.
    pub const VINTAGE_AGE_YEARS: i32 = 20;
}

/// Gamification level thresholds.
pub mod levels {
    pub const POINTS_PER_LEVEL: u64 = 500;
    pub const POINTS_PER_LISTING: u64 = 10;
    pub const POINTS_PER_SALE: u64 = 25;
    pub const POINTS_PER_PURCHASE: u64 = 15;
    pub const POINTS_PER_RATING_STAR: u64 = 50;
    /// Top of the review scale.
    pub const MAX_RATING_STARS: u64 = 5;
    /// Account age (days) after which the veteran badge unlocks.
    pub const VETERAN_DAYS: i64 = 365;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub db_path: String,
    pub api_port: u16,
    /// Log every `/estimate` call to the price_estimates table (RECORD_ESTIMATES)
    pub record_estimates: bool,
    /// Default page size for `/estimates/recent` (RECENT_ESTIMATES_LIMIT)
    pub recent_estimates_limit: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "marketplace.db".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            record_estimates: parse_bool(
                &std::env::var("RECORD_ESTIMATES").unwrap_or_else(|_| "true".to_string()),
            )
            .ok_or_else(|| AppError::Config("RECORD_ESTIMATES must be true or false".to_string()))?,
            recent_estimates_limit: std::env::var("RECENT_ESTIMATES_LIMIT")
                .unwrap_or_else(|_| "50".to_string())
                .parse::<i64>()
                .unwrap_or(50)
                .clamp(1, MAX_RECENT_ESTIMATES),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
