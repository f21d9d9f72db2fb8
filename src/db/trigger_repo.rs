use sqlx::PgPool;
use uuid::Uuid;

use crate::models::TriggerAlert;

pub async fn get_by_stock(pool: &PgPool, stock_id: Uuid) -> anyhow::Result<Vec<TriggerAlert>> {
    let triggers = sqlx::query_as::<_, TriggerAlert>(
        "SELECT * FROM trigger_alerts WHERE stock_id = $1 ORDER BY created_at",
    )
    .bind(stock_id)
    .fetch_all(pool)
    .await?;

    Ok(triggers)
}

pub async fn create(
    pool: &PgPool,
    stock_id: Uuid,
    trigger_text: &str,
) -> anyhow::Result<TriggerAlert> {
    let trigger = sqlx::query_as::<_, TriggerAlert>(
        r#"
        INSERT INTO trigger_alerts (stock_id, trigger_text)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(stock_id)
    .bind(trigger_text)
    .fetch_one(pool)
    .await?;

    Ok(trigger)
}

pub async fn update(
    pool: &PgPool,
    trigger_id: Uuid,
    trigger_text: Option<&str>,
    is_active: Option<bool>,
) -> anyhow::Result<Option<TriggerAlert>> {
    let trigger = sqlx::query_as::<_, TriggerAlert>(
        r#"
        UPDATE trigger_alerts
        SET trigger_text = COALESCE($2, trigger_text),
            is_active = COALESCE($3, is_active)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(trigger_id)
    .bind(trigger_text)
    .bind(is_active)
    .fetch_optional(pool)
    .await?;

    Ok(trigger)
}

pub async fn delete(pool: &PgPool, trigger_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM trigger_alerts WHERE id = $1")
        .bind(trigger_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_by_stock(pool: &PgPool, stock_id: Uuid) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM trigger_alerts WHERE stock_id = $1")
        .bind(stock_id)
        .execute(pool)
        .await?;

    Ok(())
}
