use chrono::{DateTime, Utc};

use crate::db::models::{PriceEstimateRow, UserActivityRow};
use crate::error::{AppError, Result};
use crate::types::UserActivityStats;

/// Aggregate a user's listings, completed sales/purchases and received
/// ratings. Returns the stats together with the account creation time.
pub async fn fetch_user_activity(
    pool: &sqlx::SqlitePool,
    user_id: &str,
) -> Result<(UserActivityStats, DateTime<Utc>)> {
    let row = sqlx::query_as::<_, UserActivityRow>(
        r#"
        SELECT
            u.created_at AS created_at,
            (SELECT COUNT(*) FROM listings l WHERE l.seller_id = u.id) AS total_listings,
            (SELECT COUNT(*) FROM orders o
                WHERE o.seller_id = u.id AND o.status = 'completed') AS total_sales,
            (SELECT COUNT(*) FROM orders o
                WHERE o.buyer_id = u.id AND o.status = 'completed') AS total_purchases,
            (SELECT AVG(CAST(r.rating AS REAL)) FROM reviews r
                WHERE r.reviewee_id = u.id) AS average_rating
        FROM users u
        WHERE u.id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;

    Ok((row.stats(), row.created_at))
}

/// Most recent logged estimates, newest first.
pub async fn recent_estimates(pool: &sqlx::SqlitePool, limit: i64) -> Result<Vec<PriceEstimateRow>> {
    let rows = sqlx::query_as::<_, PriceEstimateRow>(
        r#"
        SELECT id, created_at, title, brand, category, condition, year,
               min_price, max_price, recommended_price, confidence
        FROM price_estimates
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
