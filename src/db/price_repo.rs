use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::PricePoint;

pub async fn insert(
    conn: &mut PgConnection,
    stock_id: Uuid,
    price: Decimal,
    recorded_at: DateTime<Utc>,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO price_history (stock_id, price, recorded_at) VALUES ($1, $2, $3)")
        .bind(stock_id)
        .bind(price)
        .bind(recorded_at)
        .execute(conn)
        .await?;

    Ok(())
}

/// Most recent `limit` points, returned oldest-first for sparkline display.
pub async fn get_recent(
    pool: &PgPool,
    stock_id: Uuid,
    limit: i64,
) -> anyhow::Result<Vec<PricePoint>> {
    let mut points = sqlx::query_as::<_, PricePoint>(
        r#"
        SELECT * FROM price_history
        WHERE stock_id = $1
        ORDER BY recorded_at DESC
        LIMIT $2
        "#,
    )
    .bind(stock_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    points.reverse();
    Ok(points)
}
