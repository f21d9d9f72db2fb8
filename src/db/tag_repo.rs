use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{StockTag, TagKind};

pub async fn get_by_stock(pool: &PgPool, stock_id: Uuid) -> anyhow::Result<Vec<StockTag>> {
    let tags = sqlx::query_as::<_, StockTag>(
        "SELECT * FROM stock_tags WHERE stock_id = $1 ORDER BY created_at",
    )
    .bind(stock_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// Replace the full tag set for a stock in one transaction.
pub async fn replace_all(
    pool: &PgPool,
    stock_id: Uuid,
    tags: &[(TagKind, String)],
) -> anyhow::Result<Vec<StockTag>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM stock_tags WHERE stock_id = $1")
        .bind(stock_id)
        .execute(&mut *tx)
        .await?;

    for (kind, value) in tags {
        sqlx::query("INSERT INTO stock_tags (stock_id, kind, value) VALUES ($1, $2, $3)")
            .bind(stock_id)
            .bind(kind.as_str())
            .bind(value)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    get_by_stock(pool, stock_id).await
}

pub async fn delete(pool: &PgPool, tag_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM stock_tags WHERE id = $1")
        .bind(tag_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
