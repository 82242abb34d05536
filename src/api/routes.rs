use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::{
    extract::{FromRequest, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::health::HealthState;
use crate::api::latency::{EstimateTimings, TimingSummary};
use crate::config::{MAX_RECENT_ESTIMATES, MIN_MANUFACTURE_YEAR};
use crate::db::models::PriceEstimateRow;
use crate::db::{fetch_user_activity, recent_estimates, EstimateRecord};
use crate::error::AppError;
use crate::gamification::{self, ACHIEVEMENTS, BADGES};
use crate::pricing;
use crate::types::{
    Achievement, Badge, GamificationResult, PriceEstimationInput, PriceEstimationResult,
    UserActivityStats,
};

#[derive(Clone)]
pub struct ApiState {
    pub pool: sqlx::SqlitePool,
    pub health: Arc<HealthState>,
    pub timings: Arc<EstimateTimings>,
    /// None when estimate logging is disabled.
    pub recorder: Option<mpsc::Sender<EstimateRecord>>,
    pub recent_limit: i64,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/estimate", post(post_estimate))
        .route("/estimates/recent", get(get_recent_estimates))
        .route("/gamification/score", post(post_gamification_score))
        .route("/gamification/badges", get(get_badges))
        .route("/gamification/achievements", get(get_achievements))
        .route("/users/:id/gamification", get(get_user_gamification))
        .route("/health", get(get_health))
        .route("/stats/latency", get(get_stats_latency))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / query structs
// ---------------------------------------------------------------------------

/// JSON body extractor whose rejections render as [`AppError`].
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Deserialize)]
pub struct ScoreRequest {
    pub stats: UserActivityStats,
    pub member_since: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct RecentEstimatesQuery {
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db_ok: bool,
    pub estimates_served: u64,
    pub last_estimate_at_ns: u64,
    pub scores_served: u64,
    pub records_dropped: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn post_estimate(
    State(state): State<ApiState>,
    AppJson(input): AppJson<PriceEstimationInput>,
) -> Result<Json<PriceEstimationResult>, AppError> {
    let current_year = Utc::now().year();
    if let Some(year) = input.year {
        if !(MIN_MANUFACTURE_YEAR..=current_year + 1).contains(&year) {
            return Err(AppError::Validation(format!(
                "year must be between {MIN_MANUFACTURE_YEAR} and {}",
                current_year + 1
            )));
        }
    }

    let started = Instant::now();
    let result = pricing::estimate(&input);
    state.timings.observe(started.elapsed());

    let now = now_ns();
    state.health.record_estimate(now);
    log_estimate(&input, &result);

    if let Some(tx) = &state.recorder {
        if let Err(e) = tx.try_send(EstimateRecord::new(now, input, &result)) {
            state.health.inc_records_dropped();
            warn!("Estimate recorder channel full: {e}");
        }
    }

    Ok(Json(result))
}

async fn get_recent_estimates(
    State(state): State<ApiState>,
    Query(params): Query<RecentEstimatesQuery>,
) -> Result<Json<Vec<PriceEstimateRow>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(state.recent_limit)
        .clamp(1, MAX_RECENT_ESTIMATES);
    Ok(Json(recent_estimates(&state.pool, limit).await?))
}

async fn post_gamification_score(
    State(state): State<ApiState>,
    AppJson(req): AppJson<ScoreRequest>,
) -> Json<GamificationResult> {
    state.health.inc_scores_served();
    Json(gamification::score(&req.stats, req.member_since))
}

async fn get_user_gamification(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> Result<Json<GamificationResult>, AppError> {
    let (stats, member_since) = fetch_user_activity(&state.pool, &user_id).await?;
    let result = gamification::score(&stats, member_since);
    state.health.inc_scores_served();

    info!(
        event = "GAMIFICATION",
        user_id = %user_id,
        points = result.points,
        level = result.level,
        badges = result.unlocked_badges().count(),
        "GAMIFICATION | user: {} | points: {} | level: {}",
        user_id, result.points, result.level,
    );

    Ok(Json(result))
}

async fn get_badges() -> Json<&'static [Badge]> {
    Json(BADGES.as_slice())
}

async fn get_achievements() -> Json<&'static [Achievement]> {
    Json(ACHIEVEMENTS.as_slice())
}

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let db_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    Json(HealthResponse {
        status: if db_ok { "ok" } else { "degraded" },
        db_ok,
        estimates_served: state.health.estimates_served(),
        last_estimate_at_ns: state.health.last_estimate_at_ns(),
        scores_served: state.health.scores_served(),
        records_dropped: state.health.records_dropped(),
    })
}

async fn get_stats_latency(State(state): State<ApiState>) -> Json<TimingSummary> {
    Json(state.timings.summary())
}

fn log_estimate(input: &PriceEstimationInput, result: &PriceEstimationResult) {
    let category = input
        .category
        .map(|c| c.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    info!(
        event = "ESTIMATE",
        category = %category,
        brand = input.brand.as_deref().unwrap_or(""),
        recommended = result.recommended_price,
        confidence = result.confidence,
        "ESTIMATE | category: {} | range: {}–{} | recommended: {} | confidence: {}%",
        category, result.min_price, result.max_price, result.recommended_price, result.confidence,
    );
}

fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_pool;
    use crate::db::queries::fixtures::seed_marketplace;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn test_state(recorder: Option<mpsc::Sender<EstimateRecord>>) -> ApiState {
        let pool = open_memory_pool().await.unwrap();
        seed_marketplace(&pool).await;
        ApiState {
            pool,
            health: Arc::new(HealthState::new()),
            timings: Arc::new(EstimateTimings::new()),
            recorder,
            recent_limit: 50,
        }
    }

    async fn send_raw(state: ApiState, uri: &str, content_type: &str, body: &str) -> (StatusCode, String) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = router(state).oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn send(
        state: ApiState,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                req = req.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let resp = router(state).oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn estimate_endpoint_returns_suggestion() {
        let (tx, mut rx) = mpsc::channel(4);
        let state = test_state(Some(tx)).await;
        let health = Arc::clone(&state.health);
        let timings = Arc::clone(&state.timings);

        let (status, body) = send(
            state,
            "POST",
            "/estimate",
            Some(serde_json::json!({ "category": "förstärkare" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommended_price"], 18000);
        assert_eq!(body["min_price"], 12600);
        assert_eq!(body["max_price"], 23400);
        assert_eq!(body["confidence"], 70);
        assert_eq!(health.estimates_served(), 1);
        assert_eq!(timings.samples(), 1);

        let record = rx.try_recv().unwrap();
        assert_eq!(record.recommended_price, 18000);
    }

    #[tokio::test]
    async fn recorded_estimates_are_listed() {
        let (tx, rx) = mpsc::channel(4);
        let state = test_state(Some(tx)).await;
        let pool = state.pool.clone();
        let recorder = tokio::spawn(crate::db::EstimateRecorder::new(pool, rx).run());

        let body = serde_json::json!({
            "title": "Sonos Play:5",
            "brand": "Sonos",
            "category": "multiroom",
        });
        let (status, _) = send(state.clone(), "POST", "/estimate", Some(body)).await;
        assert_eq!(status, StatusCode::OK);

        // Dropping the last sender lets the recorder drain and exit.
        let mut state = state;
        state.recorder = None;
        recorder.await.unwrap();

        let (status, body) = send(state, "GET", "/estimates/recent?limit=5", None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["brand"], "Sonos");
        assert_eq!(rows[0]["category"], "multiroom");
        assert_eq!(rows[0]["recommended_price"], 3675);
    }

    #[tokio::test]
    async fn estimate_rejects_implausible_year() {
        let state = test_state(None).await;
        let (status, _) = send(
            state,
            "POST",
            "/estimate",
            Some(serde_json::json!({ "year": 1850 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn score_endpoint_scores_posted_stats() {
        let state = test_state(None).await;
        let (status, body) = send(
            state,
            "POST",
            "/gamification/score",
            Some(serde_json::json!({
                "stats": {
                    "total_listings": 0,
                    "total_sales": 3,
                    "total_purchases": 2,
                    "average_rating": 4.5
                },
                "member_since": "2026-01-01T00:00:00Z"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"], 305);
        assert_eq!(body["level"], 1);
        assert_eq!(body["next_level_points"], 500);
        let butterfly = body["badges"]
            .as_array()
            .unwrap()
            .iter()
            .find(|b| b["id"] == "social_butterfly")
            .unwrap();
        assert_eq!(butterfly["unlocked"], false);
    }

    #[tokio::test]
    async fn score_endpoint_caps_runaway_rating() {
        let state = test_state(None).await;
        let (status, body) = send(
            state,
            "POST",
            "/gamification/score",
            Some(serde_json::json!({
                "stats": { "average_rating": 1e20 },
                "member_since": "2026-01-01T00:00:00Z"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"], 250);
        assert_eq!(body["level"], 1);
    }

    #[tokio::test]
    async fn malformed_bodies_render_as_app_errors() {
        let state = test_state(None).await;
        let (status, text) =
            send_raw(state.clone(), "/estimate", "application/json", "{\"title\": ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(text.starts_with("Invalid JSON body:"), "{text}");

        let (status, text) =
            send_raw(state.clone(), "/estimate", "application/json", r#"{"year": "nittio"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(text.starts_with("Invalid JSON body:"), "{text}");

        let (status, text) =
            send_raw(state.clone(), "/gamification/score", "text/plain", "{}").await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(text.starts_with("Invalid JSON body:"), "{text}");

        // The handler never ran.
        assert_eq!(state.health.estimates_served(), 0);
        assert_eq!(state.health.scores_served(), 0);
    }

    #[tokio::test]
    async fn user_gamification_reads_aggregates() {
        let state = test_state(None).await;
        let (status, body) = send(state, "GET", "/users/u1/gamification", None).await;

        assert_eq!(status, StatusCode::OK);
        // 3 listings, 2 sales, 1 purchase, rating 4.5
        assert_eq!(body["points"], 30 + 50 + 15 + 200);
        let unlocked: Vec<&str> = body["badges"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|b| b["unlocked"] == true)
            .filter_map(|b| b["id"].as_str())
            .collect();
        assert!(unlocked.contains(&"five_star_seller"));
        assert!(unlocked.contains(&"veteran"));
    }

    #[tokio::test]
    async fn unknown_user_is_404() {
        let state = test_state(None).await;
        let (status, _) = send(state, "GET", "/users/ghost/gamification", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn catalogs_are_served() {
        let state = test_state(None).await;
        let (_, badges) = send(state.clone(), "GET", "/gamification/badges", None).await;
        assert_eq!(badges.as_array().unwrap().len(), 8);
        assert_eq!(badges[0]["rule"]["type"], "min_listings");

        let (_, achievements) = send(state, "GET", "/gamification/achievements", None).await;
        assert_eq!(achievements.as_array().unwrap().len(), 8);
        assert_eq!(achievements[0]["type"], "listing");
    }

    #[tokio::test]
    async fn health_reports_db_status() {
        let state = test_state(None).await;
        let (status, body) = send(state, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["db_ok"], true);
        assert_eq!(body["estimates_served"], 0);
    }
}
