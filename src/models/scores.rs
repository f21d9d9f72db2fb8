use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Ten analyst-entered sub-metrics, each 0-10. One row per stock,
/// destroyed with it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockScores {
    pub id: Uuid,
    pub stock_id: Uuid,
    pub revenue_growth: i32,
    pub fcf_margin: i32,
    pub roic: i32,
    pub dilution: i32,
    pub net_cash: i32,
    pub interest_coverage: i32,
    pub balance_dilution_risk: i32,
    pub organic_growth: i32,
    pub fcf_conversion: i32,
    pub gross_margin_stability: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
