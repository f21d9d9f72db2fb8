use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Free-form trigger note. The text is stored and displayed, never
/// evaluated against market data.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TriggerAlert {
    pub id: Uuid,
    pub stock_id: Uuid,
    pub trigger_text: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
