use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{
    BuyZoneEntry, PricePoint, Status, StockScores, StockTag, StockThesis, TriggerAlert,
};
use crate::valuation::history::BuyZoneSummary;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stock {
    pub id: Uuid,
    pub ticker: String,
    pub company_name: String,
    pub sector: Option<String>,
    pub current_price: Option<Decimal>,
    pub fair_value: Decimal,
    pub buy_target: Decimal,
    pub bear_case_fv: Option<Decimal>,
    pub bull_case_fv: Option<Decimal>,
    pub peg_ratio: Option<Decimal>,
    pub ps_ratio: Option<Decimal>,
    pub ps_ratio_5y_avg: Option<Decimal>,
    pub shares_outstanding_current: Option<i64>,
    pub shares_outstanding_prior: Option<i64>,
    pub iv_percentile: Option<Decimal>,
    pub covered_call_yield: Option<Decimal>,
    pub leap_score: Option<Decimal>,
    pub conviction: i32,
    pub allocation_hint: Option<String>,
    pub macro_gated: bool,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub price_updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read model returned by the list endpoint: the stock joined with its
/// owned records plus every derived metric.
#[derive(Debug, Clone, Serialize)]
pub struct StockWithDetails {
    #[serde(flatten)]
    pub stock: Stock,
    pub scores: Option<StockScores>,
    pub thesis: Option<StockThesis>,
    pub tags: Vec<StockTag>,
    pub triggers: Vec<TriggerAlert>,
    pub buy_zone_entries: Vec<BuyZoneEntry>,
    pub price_history: Vec<PricePoint>,
    pub upside_pct: Option<Decimal>,
    pub asymmetry_ratio: Option<Decimal>,
    pub dilution_risk_pct: Option<Decimal>,
    pub execution_score: Option<Decimal>,
    pub balance_sheet_score: Option<Decimal>,
    pub growth_quality_score: Option<Decimal>,
    pub buy_zone_stats: BuyZoneSummary,
}
