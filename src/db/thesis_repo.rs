use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::StockThesis;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThesisInput {
    pub thesis: Option<String>,
    pub what_would_break_it: Option<String>,
    pub buy_triggers: Option<String>,
    pub sell_triggers: Option<String>,
    pub notes: Option<String>,
    pub risk_notes: Option<String>,
}

pub async fn get_by_stock(pool: &PgPool, stock_id: Uuid) -> anyhow::Result<Option<StockThesis>> {
    let thesis = sqlx::query_as::<_, StockThesis>(
        "SELECT * FROM stock_thesis WHERE stock_id = $1",
    )
    .bind(stock_id)
    .fetch_optional(pool)
    .await?;

    Ok(thesis)
}

pub async fn upsert(
    pool: &PgPool,
    stock_id: Uuid,
    input: &ThesisInput,
) -> anyhow::Result<StockThesis> {
    let thesis = sqlx::query_as::<_, StockThesis>(
        r#"
        INSERT INTO stock_thesis (
            stock_id, thesis, what_would_break_it, buy_triggers,
            sell_triggers, notes, risk_notes
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (stock_id) DO UPDATE SET
            thesis = COALESCE($2, stock_thesis.thesis),
            what_would_break_it = COALESCE($3, stock_thesis.what_would_break_it),
            buy_triggers = COALESCE($4, stock_thesis.buy_triggers),
            sell_triggers = COALESCE($5, stock_thesis.sell_triggers),
            notes = COALESCE($6, stock_thesis.notes),
            risk_notes = COALESCE($7, stock_thesis.risk_notes),
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(stock_id)
    .bind(&input.thesis)
    .bind(&input.what_would_break_it)
    .bind(&input.buy_triggers)
    .bind(&input.sell_triggers)
    .bind(&input.notes)
    .bind(&input.risk_notes)
    .fetch_one(pool)
    .await?;

    Ok(thesis)
}
