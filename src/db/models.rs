//! Database row types matching the schema in migrations/.
//! Used by sqlx for typed queries.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::UserActivityStats;

/// One user's activity counters, aggregated in SQL.
#[derive(Debug, sqlx::FromRow)]
pub struct UserActivityRow {
    pub created_at: DateTime<Utc>,
    pub total_listings: i64,
    pub total_sales: i64,
    pub total_purchases: i64,
    pub average_rating: Option<f64>,
}

impl UserActivityRow {
    pub fn stats(&self) -> UserActivityStats {
        let count = |n: i64| u32::try_from(n.max(0)).unwrap_or(u32::MAX);
        UserActivityStats {
            total_listings: count(self.total_listings),
            total_sales: count(self.total_sales),
            total_purchases: count(self.total_purchases),
            average_rating: self.average_rating.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct PriceEstimateRow {
    pub id: i64,
    /// Nanosecond UTC epoch timestamp.
    pub created_at: i64,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub year: Option<i64>,
    pub min_price: i64,
    pub max_price: i64,
    pub recommended_price: i64,
    pub confidence: i64,
}
