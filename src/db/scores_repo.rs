use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::StockScores;

/// Partial score update; absent fields keep their stored value (or the
/// default 5 on first insert).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoresInput {
    pub revenue_growth: Option<i32>,
    pub fcf_margin: Option<i32>,
    pub roic: Option<i32>,
    pub dilution: Option<i32>,
    pub net_cash: Option<i32>,
    pub interest_coverage: Option<i32>,
    pub balance_dilution_risk: Option<i32>,
    pub organic_growth: Option<i32>,
    pub fcf_conversion: Option<i32>,
    pub gross_margin_stability: Option<i32>,
}

impl ScoresInput {
    pub fn values(&self) -> [Option<i32>; 10] {
        [
            self.revenue_growth,
            self.fcf_margin,
            self.roic,
            self.dilution,
            self.net_cash,
            self.interest_coverage,
            self.balance_dilution_risk,
            self.organic_growth,
            self.fcf_conversion,
            self.gross_margin_stability,
        ]
    }
}

pub async fn get_by_stock(pool: &PgPool, stock_id: Uuid) -> anyhow::Result<Option<StockScores>> {
    let scores = sqlx::query_as::<_, StockScores>(
        "SELECT * FROM stock_scores WHERE stock_id = $1",
    )
    .bind(stock_id)
    .fetch_optional(pool)
    .await?;

    Ok(scores)
}

pub async fn upsert(
    pool: &PgPool,
    stock_id: Uuid,
    input: &ScoresInput,
) -> anyhow::Result<StockScores> {
    let scores = sqlx::query_as::<_, StockScores>(
        r#"
        INSERT INTO stock_scores (
            stock_id, revenue_growth, fcf_margin, roic, dilution,
            net_cash, interest_coverage, balance_dilution_risk,
            organic_growth, fcf_conversion, gross_margin_stability
        )
        VALUES (
            $1,
            COALESCE($2, 5), COALESCE($3, 5), COALESCE($4, 5), COALESCE($5, 5),
            COALESCE($6, 5), COALESCE($7, 5), COALESCE($8, 5),
            COALESCE($9, 5), COALESCE($10, 5), COALESCE($11, 5)
        )
        ON CONFLICT (stock_id) DO UPDATE SET
            revenue_growth = COALESCE($2, stock_scores.revenue_growth),
            fcf_margin = COALESCE($3, stock_scores.fcf_margin),
            roic = COALESCE($4, stock_scores.roic),
            dilution = COALESCE($5, stock_scores.dilution),
            net_cash = COALESCE($6, stock_scores.net_cash),
            interest_coverage = COALESCE($7, stock_scores.interest_coverage),
            balance_dilution_risk = COALESCE($8, stock_scores.balance_dilution_risk),
            organic_growth = COALESCE($9, stock_scores.organic_growth),
            fcf_conversion = COALESCE($10, stock_scores.fcf_conversion),
            gross_margin_stability = COALESCE($11, stock_scores.gross_margin_stability),
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(stock_id)
    .bind(input.revenue_growth)
    .bind(input.fcf_margin)
    .bind(input.roic)
    .bind(input.dilution)
    .bind(input.net_cash)
    .bind(input.interest_coverage)
    .bind(input.balance_dilution_risk)
    .bind(input.organic_growth)
    .bind(input.fcf_conversion)
    .bind(input.gross_margin_stability)
    .fetch_one(pool)
    .await?;

    Ok(scores)
}
