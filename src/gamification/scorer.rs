use chrono::{DateTime, Utc};

use crate::config::levels::{
    MAX_RATING_STARS, POINTS_PER_LEVEL, POINTS_PER_LISTING, POINTS_PER_PURCHASE,
    POINTS_PER_RATING_STAR, POINTS_PER_SALE,
};
use crate::gamification::catalog::{ACHIEVEMENTS, BADGES};
use crate::types::{
    AchievementKind, AchievementStatus, BadgeRule, BadgeStatus, GamificationResult,
    UserActivityStats,
};

/// Score a user's activity as of now.
pub fn score(stats: &UserActivityStats, member_since: DateTime<Utc>) -> GamificationResult {
    score_at(stats, member_since, Utc::now())
}

/// Score a user's activity as of `now`. Level and point math only depends on
/// `stats`; `now` only matters for account-age badges.
pub fn score_at(
    stats: &UserActivityStats,
    member_since: DateTime<Utc>,
    now: DateTime<Utc>,
) -> GamificationResult {
    let points = points(stats);
    let (level, next_level_points, progress) = level_progress(points);
    let account_age_days = (now - member_since).num_days();

    let badges = BADGES
        .iter()
        .map(|badge| BadgeStatus {
            badge,
            unlocked: badge_unlocked(badge.rule, stats, account_age_days),
        })
        .collect();

    let achievements = ACHIEVEMENTS
        .iter()
        .map(|achievement| AchievementStatus {
            achievement,
            unlocked: achievement_unlocked(achievement.kind, achievement.requirement, stats),
        })
        .collect();

    GamificationResult {
        level,
        points,
        next_level_points,
        progress,
        badges,
        achievements,
    }
}

/// `listings*10 + sales*25 + purchases*15 + floor(rating)*50`.
pub fn points(stats: &UserActivityStats) -> u64 {
    [
        (u64::from(stats.total_listings), POINTS_PER_LISTING),
        (u64::from(stats.total_sales), POINTS_PER_SALE),
        (u64::from(stats.total_purchases), POINTS_PER_PURCHASE),
        (rating_stars(stats.average_rating), POINTS_PER_RATING_STAR),
    ]
    .into_iter()
    .fold(0u64, |acc, (count, per)| acc.saturating_add(count.saturating_mul(per)))
}

/// Level, points needed for the next level, and percent progress towards it.
pub fn level_progress(points: u64) -> (u32, u64, f64) {
    let completed = points / POINTS_PER_LEVEL;
    let level_floor = completed * POINTS_PER_LEVEL;
    let progress = (points - level_floor) as f64 / POINTS_PER_LEVEL as f64 * 100.0;
    (
        u32::try_from(completed + 1).unwrap_or(u32::MAX),
        level_floor.saturating_add(POINTS_PER_LEVEL),
        progress,
    )
}

/// Whole stars of an average rating, kept on the 0..=5 review scale.
/// NaN and negatives count as zero.
fn rating_stars(average_rating: f64) -> u64 {
    if average_rating.is_nan() {
        return 0;
    }
    average_rating.clamp(0.0, MAX_RATING_STARS as f64).floor() as u64
}

fn badge_unlocked(rule: BadgeRule, stats: &UserActivityStats, account_age_days: i64) -> bool {
    match rule {
        BadgeRule::MinListings(n) => stats.total_listings >= n,
        BadgeRule::MinSales(n) => stats.total_sales >= n,
        BadgeRule::MinPurchases(n) => stats.total_purchases >= n,
        BadgeRule::MinRating(r) => stats.average_rating >= r,
        BadgeRule::AccountAgeDays(days) => account_age_days > days,
        BadgeRule::Never => false,
    }
}

fn achievement_unlocked(kind: AchievementKind, requirement: u32, stats: &UserActivityStats) -> bool {
    match kind {
        AchievementKind::Listing => stats.total_listings >= requirement,
        AchievementKind::Sale => stats.total_sales >= requirement,
        AchievementKind::Purchase => stats.total_purchases >= requirement,
        AchievementKind::Rating => stats.average_rating >= f64::from(requirement),
    }
}
