use chrono::{DateTime, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::db::{buy_zone_repo, price_repo, stock_repo};
use crate::models::{Status, Stock};
use crate::valuation::{classify, on_status_change, BuyZoneEvent};

/// Result of pushing one price observation through the pipeline.
#[derive(Debug, Clone)]
pub struct PriceUpdateOutcome {
    pub old_status: Status,
    pub new_status: Status,
    pub event: Option<BuyZoneEvent>,
}

/// Apply a price observation to a stock: reclassify, persist, and record
/// any buy-zone boundary crossing.
///
/// The whole cycle runs in one transaction holding a row lock on the
/// stock, which is what keeps the one-open-entry invariant intact when
/// writers overlap. A `None` price is a real observation (fetch failure
/// or rate limit), not zero: it clears the stored price and reclassifies
/// through the unknown-price branch.
pub async fn apply_price_update(
    pool: &PgPool,
    stock_id: Uuid,
    price: Option<Decimal>,
    observed_at: DateTime<Utc>,
) -> anyhow::Result<Option<PriceUpdateOutcome>> {
    let mut tx = pool.begin().await?;

    let Some(stock) = stock_repo::lock_for_update(&mut tx, stock_id).await? else {
        return Ok(None);
    };

    let old_status = stock.status;
    let new_status = classify(price, stock.buy_target, stock.macro_gated);

    let mut updated = stock;
    updated.current_price = price;
    updated.status = new_status;
    updated.price_updated_at = Some(observed_at);
    stock_repo::update_row(&mut tx, &updated).await?;

    if let Some(p) = price {
        price_repo::insert(&mut tx, stock_id, p, observed_at).await?;
    }

    let event = on_status_change(old_status, new_status, price);
    if let Some(ev) = event {
        record_transition(&mut tx, stock_id, ev, observed_at).await?;
    }

    tx.commit().await?;

    counter!("price_updates_total").increment(1);

    if old_status != new_status {
        tracing::info!(
            stock_id = %stock_id,
            old_status = %old_status,
            new_status = %new_status,
            "Status changed"
        );
    }

    Ok(Some(PriceUpdateOutcome {
        old_status,
        new_status,
        event,
    }))
}

/// Partial manual edit. `None` keeps the stored value; `Some(None)` clears
/// a nullable field (JSON null).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockPatch {
    pub ticker: Option<String>,
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub sector: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub current_price: Option<Option<Decimal>>,
    pub fair_value: Option<Decimal>,
    pub buy_target: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    pub bear_case_fv: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bull_case_fv: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub peg_ratio: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub ps_ratio: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub ps_ratio_5y_avg: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub shares_outstanding_current: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub shares_outstanding_prior: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub iv_percentile: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub covered_call_yield: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub leap_score: Option<Option<Decimal>>,
    pub conviction: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub allocation_hint: Option<Option<String>>,
    pub macro_gated: Option<bool>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

impl StockPatch {
    fn apply_to(&self, stock: &mut Stock) {
        if let Some(v) = &self.ticker {
            stock.ticker = v.to_uppercase();
        }
        if let Some(v) = &self.company_name {
            stock.company_name = v.clone();
        }
        if let Some(v) = &self.sector {
            stock.sector = v.clone();
        }
        if let Some(v) = self.current_price {
            stock.current_price = v;
        }
        if let Some(v) = self.fair_value {
            stock.fair_value = v;
        }
        if let Some(v) = self.buy_target {
            stock.buy_target = v;
        }
        if let Some(v) = self.bear_case_fv {
            stock.bear_case_fv = v;
        }
        if let Some(v) = self.bull_case_fv {
            stock.bull_case_fv = v;
        }
        if let Some(v) = self.peg_ratio {
            stock.peg_ratio = v;
        }
        if let Some(v) = self.ps_ratio {
            stock.ps_ratio = v;
        }
        if let Some(v) = self.ps_ratio_5y_avg {
            stock.ps_ratio_5y_avg = v;
        }
        if let Some(v) = self.shares_outstanding_current {
            stock.shares_outstanding_current = v;
        }
        if let Some(v) = self.shares_outstanding_prior {
            stock.shares_outstanding_prior = v;
        }
        if let Some(v) = self.iv_percentile {
            stock.iv_percentile = v;
        }
        if let Some(v) = self.covered_call_yield {
            stock.covered_call_yield = v;
        }
        if let Some(v) = self.leap_score {
            stock.leap_score = v;
        }
        if let Some(v) = self.conviction {
            stock.conviction = v;
        }
        if let Some(v) = &self.allocation_hint {
            stock.allocation_hint = v.clone();
        }
        if let Some(v) = self.macro_gated {
            stock.macro_gated = v;
        }
    }
}

/// Apply a manual edit. Status is always re-derived from the merged
/// inputs, and a boundary crossing (e.g. toggling `macro_gated` while in
/// the zone, or moving the target) updates buy-zone history exactly like
/// a price tick would.
pub async fn apply_stock_edit(
    pool: &PgPool,
    stock_id: Uuid,
    patch: &StockPatch,
) -> anyhow::Result<Option<Stock>> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let Some(stock) = stock_repo::lock_for_update(&mut tx, stock_id).await? else {
        return Ok(None);
    };

    let old_status = stock.status;

    let mut updated = stock;
    patch.apply_to(&mut updated);
    updated.status = classify(updated.current_price, updated.buy_target, updated.macro_gated);

    let saved = stock_repo::update_row(&mut tx, &updated).await?;

    if let Some(ev) = on_status_change(old_status, saved.status, saved.current_price) {
        record_transition(&mut tx, stock_id, ev, now).await?;
    }

    tx.commit().await?;

    Ok(Some(saved))
}

async fn record_transition(
    conn: &mut PgConnection,
    stock_id: Uuid,
    event: BuyZoneEvent,
    at: DateTime<Utc>,
) -> anyhow::Result<()> {
    match event {
        BuyZoneEvent::Enter { price } => {
            buy_zone_repo::open_entry(conn, stock_id, price, at).await?;
            counter!("buy_zone_enters_total").increment(1);
            tracing::info!(stock_id = %stock_id, price = ?price, "Entered buy zone");
        }
        BuyZoneEvent::Exit { price } => {
            let closed = buy_zone_repo::close_open_entry(conn, stock_id, price, at).await?;
            counter!("buy_zone_exits_total").increment(1);
            tracing::info!(
                stock_id = %stock_id,
                price = ?price,
                closed = closed.is_some(),
                "Exited buy zone"
            );
        }
    }

    Ok(())
}
