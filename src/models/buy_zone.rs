use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A time-bounded interval during which a stock sat in buy_zone status.
/// At most one row per stock has `exited_at = NULL`; rows are immutable
/// once closed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BuyZoneEntry {
    pub id: Uuid,
    pub stock_id: Uuid,
    pub entered_at: DateTime<Utc>,
    pub exited_at: Option<DateTime<Utc>>,
    pub entry_price: Option<Decimal>,
    pub exit_price: Option<Decimal>,
    /// 'win' or 'loss', stamped at close time when both prices are known.
    pub outcome: Option<String>,
}
