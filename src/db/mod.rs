pub mod buy_zone_repo;
pub mod macro_repo;
pub mod price_repo;
pub mod scores_repo;
pub mod stock_repo;
pub mod tag_repo;
pub mod thesis_repo;
pub mod trigger_repo;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn init_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}
