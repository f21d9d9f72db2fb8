use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::BuyZoneEntry;

pub async fn get_by_stock(pool: &PgPool, stock_id: Uuid) -> anyhow::Result<Vec<BuyZoneEntry>> {
    let entries = sqlx::query_as::<_, BuyZoneEntry>(
        "SELECT * FROM buy_zone_history WHERE stock_id = $1 ORDER BY entered_at DESC",
    )
    .bind(stock_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Open a new buy-zone interval. Caller holds the stock row lock, so the
/// partial unique index on (stock_id) WHERE exited_at IS NULL cannot trip.
pub async fn open_entry(
    conn: &mut PgConnection,
    stock_id: Uuid,
    entry_price: Option<Decimal>,
    entered_at: DateTime<Utc>,
) -> anyhow::Result<BuyZoneEntry> {
    let entry = sqlx::query_as::<_, BuyZoneEntry>(
        r#"
        INSERT INTO buy_zone_history (stock_id, entry_price, entered_at)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(stock_id)
    .bind(entry_price)
    .bind(entered_at)
    .fetch_one(conn)
    .await?;

    Ok(entry)
}

/// Close the open interval for a stock, if one exists. The outcome is
/// stamped here, once, and the row is never touched again.
pub async fn close_open_entry(
    conn: &mut PgConnection,
    stock_id: Uuid,
    exit_price: Option<Decimal>,
    exited_at: DateTime<Utc>,
) -> anyhow::Result<Option<BuyZoneEntry>> {
    let entry = sqlx::query_as::<_, BuyZoneEntry>(
        r#"
        UPDATE buy_zone_history
        SET exited_at = $3,
            exit_price = $2,
            outcome = CASE
                WHEN $2::DECIMAL IS NULL OR entry_price IS NULL THEN NULL
                WHEN $2::DECIMAL > entry_price THEN 'win'
                ELSE 'loss'
            END
        WHERE stock_id = $1 AND exited_at IS NULL
        RETURNING *
        "#,
    )
    .bind(stock_id)
    .bind(exit_price)
    .bind(exited_at)
    .fetch_optional(conn)
    .await?;

    Ok(entry)
}

pub async fn get_open_entry(
    pool: &PgPool,
    stock_id: Uuid,
) -> anyhow::Result<Option<BuyZoneEntry>> {
    let entry = sqlx::query_as::<_, BuyZoneEntry>(
        "SELECT * FROM buy_zone_history WHERE stock_id = $1 AND exited_at IS NULL",
    )
    .bind(stock_id)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}
