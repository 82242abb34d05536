use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::error::Result;
use crate::types::{PriceEstimationInput, PriceEstimationResult};

/// An issued estimate, queued for the audit log.
#[derive(Debug, Clone)]
pub struct EstimateRecord {
    pub created_at_ns: u64,
    pub input: PriceEstimationInput,
    pub min_price: i64,
    pub max_price: i64,
    pub recommended_price: i64,
    pub confidence: u8,
}

impl EstimateRecord {
    pub fn new(created_at_ns: u64, input: PriceEstimationInput, result: &PriceEstimationResult) -> Self {
        Self {
            created_at_ns,
            input,
            min_price: result.min_price,
            max_price: result.max_price,
            recommended_price: result.recommended_price,
            confidence: result.confidence,
        }
    }
}

/// Receives EstimateRecords from the API and persists them to SQLite.
/// Runs as a dedicated background task so handlers never wait on the write.
pub struct EstimateRecorder {
    pool: sqlx::SqlitePool,
    rx: mpsc::Receiver<EstimateRecord>,
}

impl EstimateRecorder {
    pub fn new(pool: sqlx::SqlitePool, rx: mpsc::Receiver<EstimateRecord>) -> Self {
        Self { pool, rx }
    }

    pub async fn run(mut self) {
        while let Some(record) = self.rx.recv().await {
            if let Err(e) = self.write_estimate(&record).await {
                error!("DB write error: {e}");
            }
        }
        debug!("Estimate recorder channel closed");
    }

    async fn write_estimate(&self, r: &EstimateRecord) -> Result<()> {
        let created_at = r.created_at_ns as i64;
        let category = r.input.category.map(|c| c.to_string());
        let condition = r.input.condition.map(|c| c.to_string());

        sqlx::query(
            r#"
            INSERT INTO price_estimates (
                created_at, title, brand, category, condition, year,
                min_price, max_price, recommended_price, confidence
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(created_at)
        .bind(r.input.title.as_deref())
        .bind(r.input.brand.as_deref())
        .bind(category)
        .bind(condition)
        .bind(r.input.year)
        .bind(r.min_price)
        .bind(r.max_price)
        .bind(r.recommended_price)
        .bind(i64::from(r.confidence))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
