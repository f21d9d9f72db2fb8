use serde::Deserialize;
use sqlx::PgPool;

use crate::models::MacroRegime;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MacroRegimeInput {
    pub risk_on_pct: Option<i32>,
    pub liquidity: Option<String>,
    pub credit: Option<String>,
    pub btc_status: Option<String>,
}

/// Fetch the singleton regime row, creating the default if the table is
/// empty. There is exactly one row by construction.
pub async fn get_or_init(pool: &PgPool) -> anyhow::Result<MacroRegime> {
    if let Some(regime) =
        sqlx::query_as::<_, MacroRegime>("SELECT * FROM macro_regime LIMIT 1")
            .fetch_optional(pool)
            .await?
    {
        return Ok(regime);
    }

    let regime = sqlx::query_as::<_, MacroRegime>(
        r#"
        INSERT INTO macro_regime (risk_on_pct, liquidity, credit, btc_status)
        VALUES (50, 'Neutral', 'Healthy', 'Unknown')
        RETURNING *
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(regime)
}

pub async fn update(pool: &PgPool, input: &MacroRegimeInput) -> anyhow::Result<MacroRegime> {
    let existing = get_or_init(pool).await?;

    let regime = sqlx::query_as::<_, MacroRegime>(
        r#"
        UPDATE macro_regime
        SET risk_on_pct = COALESCE($2, risk_on_pct),
            liquidity = COALESCE($3, liquidity),
            credit = COALESCE($4, credit),
            btc_status = COALESCE($5, btc_status),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(existing.id)
    .bind(input.risk_on_pct)
    .bind(&input.liquidity)
    .bind(&input.credit)
    .bind(&input.btc_status)
    .fetch_one(pool)
    .await?;

    Ok(regime)
}
