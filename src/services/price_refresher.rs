use std::time::{Duration, Instant};

use chrono::Utc;
use metrics::{counter, histogram};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use tokio::time::sleep;

use crate::alphavantage::{QuoteClient, QuoteError};
use crate::db::stock_repo;
use crate::ingestion::pipeline;

/// Per-ticker result of one refresh pass, returned to the API caller.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResult {
    pub ticker: String,
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Walk the whole watchlist once, sequentially.
///
/// Alpha Vantage's free tier allows 5 requests/minute, so each fetch is
/// separated by `quote_delay_secs` (12s by default). Every outcome,
/// including a failed fetch, is pushed through the pipeline so the
/// stock reclassifies on a lost price instead of going stale.
pub async fn refresh_all(
    client: &QuoteClient,
    pool: &PgPool,
    quote_delay_secs: u64,
) -> anyhow::Result<Vec<RefreshResult>> {
    let start = Instant::now();
    let stocks = stock_repo::get_all(pool).await?;
    let mut results = Vec::with_capacity(stocks.len());

    for (i, stock) in stocks.iter().enumerate() {
        let fetched = match client.get_quote(&stock.ticker).await {
            Ok(price) => RefreshResult {
                ticker: stock.ticker.clone(),
                price: Some(price),
                error: None,
            },
            Err(e) => {
                counter!("quote_fetch_failures_total").increment(1);
                let reason = match &e {
                    QuoteError::RateLimited(_) => "rate limited",
                    QuoteError::NoData(_) => "no price data",
                    QuoteError::Http(_) => "fetch failed",
                };
                tracing::warn!(ticker = %stock.ticker, error = %e, "Quote fetch failed");
                RefreshResult {
                    ticker: stock.ticker.clone(),
                    price: None,
                    error: Some(reason.to_string()),
                }
            }
        };

        pipeline::apply_price_update(pool, stock.id, fetched.price, Utc::now()).await?;
        results.push(fetched);

        if i + 1 < stocks.len() {
            sleep(Duration::from_secs(quote_delay_secs)).await;
        }
    }

    let updated = results.iter().filter(|r| r.price.is_some()).count();
    histogram!("refresh_cycle_seconds").record(start.elapsed().as_secs_f64());
    tracing::info!(
        updated = updated,
        total = results.len(),
        "Price refresh cycle complete"
    );

    Ok(results)
}

/// Background refresh loop, enabled via `REFRESH_ENABLED`.
pub async fn run_price_refresher(
    client: QuoteClient,
    pool: PgPool,
    interval_secs: u64,
    quote_delay_secs: u64,
) {
    tracing::info!(interval_secs = interval_secs, "Price refresher started");

    loop {
        sleep(Duration::from_secs(interval_secs)).await;

        if let Err(e) = refresh_all(&client, &pool, quote_delay_secs).await {
            tracing::error!(error = %e, "Price refresh cycle failed");
        }
    }
}
