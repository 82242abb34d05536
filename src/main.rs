mod api;
mod config;
mod db;
mod error;
mod gamification;
mod pricing;
mod types;

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::{router, ApiState, EstimateTimings, HealthState};
use crate::config::{Config, CHANNEL_CAPACITY};
use crate::db::{EstimateRecord, EstimateRecorder};
use crate::error::Result;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // --- Database setup ---
    let pool = db::open_pool(&cfg.db_path).await?;
    info!("Database ready at {}", cfg.db_path);

    // --- Estimate audit log ---
    let recorder = if cfg.record_estimates {
        let (tx, rx) = mpsc::channel::<EstimateRecord>(CHANNEL_CAPACITY);
        let writer = EstimateRecorder::new(pool.clone(), rx);
        tokio::spawn(async move { writer.run().await });
        Some(tx)
    } else {
        warn!("RECORD_ESTIMATES=false: estimates will not be logged");
        None
    };

    // --- HTTP API server ---
    let api_state = ApiState {
        pool: pool.clone(),
        health: Arc::new(HealthState::new()),
        timings: Arc::new(EstimateTimings::new()),
        recorder,
        recent_limit: cfg.recent_estimates_limit,
    };
    let app = router(api_state);
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
