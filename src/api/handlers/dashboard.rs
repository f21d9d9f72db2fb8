use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::stock_repo;
use crate::errors::AppError;
use crate::models::Status;
use crate::AppState;

#[derive(Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub buy_zone: usize,
    pub watch_zone: usize,
    pub extended: usize,
    pub avoid: usize,
    /// Mean distance from target over priced stocks; `None` when nothing
    /// has a price yet.
    pub avg_pct_above_target: Option<Decimal>,
}

pub async fn summary(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let stocks = stock_repo::get_all(&state.db).await?;

    let count = |s: Status| stocks.iter().filter(|st| st.status == s).count();

    let priced: Vec<Decimal> = stocks
        .iter()
        .filter_map(|s| {
            let price = s.current_price?;
            Some((price - s.buy_target) / s.buy_target * Decimal::ONE_HUNDRED)
        })
        .collect();

    let avg_pct_above_target = if priced.is_empty() {
        None
    } else {
        Some(priced.iter().sum::<Decimal>() / Decimal::from(priced.len() as i64))
    };

    Ok(Json(DashboardSummary {
        total: stocks.len(),
        buy_zone: count(Status::BuyZone),
        watch_zone: count(Status::WatchZone),
        extended: count(Status::Extended),
        avoid: count(Status::Avoid),
        avg_pct_above_target,
    }))
}
