use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Free-text investment thesis. One row per stock.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockThesis {
    pub id: Uuid,
    pub stock_id: Uuid,
    pub thesis: Option<String>,
    pub what_would_break_it: Option<String>,
    pub buy_triggers: Option<String>,
    pub sell_triggers: Option<String>,
    pub notes: Option<String>,
    pub risk_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
