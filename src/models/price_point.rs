use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Append-only price observation, kept for trend display. The classifier
/// never reads this table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PricePoint {
    pub id: Uuid,
    pub stock_id: Uuid,
    pub price: Decimal,
    pub recorded_at: DateTime<Utc>,
}
