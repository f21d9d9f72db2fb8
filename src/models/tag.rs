use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::TagKind;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockTag {
    pub id: Uuid,
    pub stock_id: Uuid,
    #[sqlx(try_from = "String")]
    pub kind: TagKind,
    pub value: String,
    pub created_at: DateTime<Utc>,
}
