use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Process-wide macro backdrop. Single row; read by the UI only. The
/// classifier never consults it; callers gate per stock via `macro_gated`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MacroRegime {
    pub id: Uuid,
    pub risk_on_pct: i32,
    pub liquidity: String,
    pub credit: String,
    pub btc_status: String,
    pub updated_at: DateTime<Utc>,
}
