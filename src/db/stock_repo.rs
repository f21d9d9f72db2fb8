use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{Status, Stock};

/// Insert payload. Built by the API layer after validation; `status` is
/// computed by the caller from the valuation core, never supplied by
/// clients.
#[derive(Debug, Clone)]
pub struct NewStock {
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
    pub status: Status,
}

pub async fn get_all(pool: &PgPool) -> anyhow::Result<Vec<Stock>> {
    let stocks = sqlx::query_as::<_, Stock>(
        "SELECT * FROM stocks ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(stocks)
}

pub async fn get_by_id(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Stock>> {
    let stock = sqlx::query_as::<_, Stock>("SELECT * FROM stocks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(stock)
}

pub async fn insert(pool: &PgPool, new: &NewStock) -> Result<Stock, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        r#"
        INSERT INTO stocks (
            ticker, company_name, sector, current_price, fair_value, buy_target,
            bear_case_fv, bull_case_fv, peg_ratio, ps_ratio, ps_ratio_5y_avg,
            shares_outstanding_current, shares_outstanding_prior,
            iv_percentile, covered_call_yield, leap_score,
            conviction, allocation_hint, macro_gated, status
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
            $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
        )
        RETURNING *
        "#,
    )
    .bind(new.ticker.to_uppercase())
    .bind(&new.company_name)
    .bind(&new.sector)
    .bind(new.current_price)
    .bind(new.fair_value)
    .bind(new.buy_target)
    .bind(new.bear_case_fv)
    .bind(new.bull_case_fv)
    .bind(new.peg_ratio)
    .bind(new.ps_ratio)
    .bind(new.ps_ratio_5y_avg)
    .bind(new.shares_outstanding_current)
    .bind(new.shares_outstanding_prior)
    .bind(new.iv_percentile)
    .bind(new.covered_call_yield)
    .bind(new.leap_score)
    .bind(new.conviction)
    .bind(&new.allocation_hint)
    .bind(new.macro_gated)
    .bind(new.status.as_str())
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM stocks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Lock a stock row for the duration of the surrounding transaction.
/// Every read-classify-write cycle goes through this so two writers can
/// never both observe "no open buy-zone entry".
pub async fn lock_for_update(
    conn: &mut PgConnection,
    id: Uuid,
) -> anyhow::Result<Option<Stock>> {
    let stock = sqlx::query_as::<_, Stock>("SELECT * FROM stocks WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(stock)
}

/// Write back every mutable column, including the freshly derived status.
pub async fn update_row(conn: &mut PgConnection, stock: &Stock) -> anyhow::Result<Stock> {
    let updated = sqlx::query_as::<_, Stock>(
        r#"
        UPDATE stocks SET
            ticker = $2,
            company_name = $3,
            sector = $4,
            current_price = $5,
            fair_value = $6,
            buy_target = $7,
            bear_case_fv = $8,
            bull_case_fv = $9,
            peg_ratio = $10,
            ps_ratio = $11,
            ps_ratio_5y_avg = $12,
            shares_outstanding_current = $13,
            shares_outstanding_prior = $14,
            iv_percentile = $15,
            covered_call_yield = $16,
            leap_score = $17,
            conviction = $18,
            allocation_hint = $19,
            macro_gated = $20,
            status = $21,
            price_updated_at = $22,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(stock.id)
    .bind(stock.ticker.to_uppercase())
    .bind(&stock.company_name)
    .bind(&stock.sector)
    .bind(stock.current_price)
    .bind(stock.fair_value)
    .bind(stock.buy_target)
    .bind(stock.bear_case_fv)
    .bind(stock.bull_case_fv)
    .bind(stock.peg_ratio)
    .bind(stock.ps_ratio)
    .bind(stock.ps_ratio_5y_avg)
    .bind(stock.shares_outstanding_current)
    .bind(stock.shares_outstanding_prior)
    .bind(stock.iv_percentile)
    .bind(stock.covered_call_yield)
    .bind(stock.leap_score)
    .bind(stock.conviction)
    .bind(&stock.allocation_hint)
    .bind(stock.macro_gated)
    .bind(stock.status.as_str())
    .bind(stock.price_updated_at)
    .fetch_one(conn)
    .await?;

    Ok(updated)
}
