use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use metrics::gauge;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::alphavantage::QuoteError;
use crate::db::scores_repo::ScoresInput;
use crate::db::stock_repo::NewStock;
use crate::db::thesis_repo::ThesisInput;
use crate::db::{
    buy_zone_repo, price_repo, scores_repo, stock_repo, tag_repo, thesis_repo, trigger_repo,
};
use crate::errors::AppError;
use crate::ingestion::pipeline::{self, StockPatch};
use crate::models::{AllocationHint, Stock, StockWithDetails, TagKind};
use crate::services::price_refresher::{self, RefreshResult};
use crate::valuation::{classify, derived, history};
use crate::AppState;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStockBody {
    pub ticker: Option<String>,
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub current_price: Option<Decimal>,
    pub fair_value: Option<Decimal>,
    pub buy_target: Option<Decimal>,
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
    pub conviction: Option<i32>,
    pub allocation_hint: Option<String>,
    pub macro_gated: Option<bool>,
}

/// Create payload: either a nested `stock` object or flat fields, plus
/// optional owned records.
#[derive(Debug, Default, Deserialize)]
pub struct CreateStockPayload {
    pub stock: Option<CreateStockBody>,
    pub thesis: Option<ThesisInput>,
    pub scores: Option<ScoresInput>,
    pub tags: Option<Vec<TagInput>>,
    pub triggers: Option<Vec<TriggerInput>>,
    #[serde(flatten)]
    pub flat: CreateStockBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStockPayload {
    pub stock: Option<StockPatch>,
    pub thesis: Option<ThesisInput>,
    pub scores: Option<ScoresInput>,
    pub tags: Option<Vec<TagInput>>,
    pub triggers: Option<Vec<TriggerInput>>,
    #[serde(flatten)]
    pub flat: StockPatch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagInput {
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerInput {
    pub trigger_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Validation: invalid input never reaches the valuation core
// ---------------------------------------------------------------------------

fn validate_body(body: &CreateStockBody) -> Result<(), AppError> {
    if let Some(target) = body.buy_target {
        if target <= Decimal::ZERO {
            return Err(AppError::BadRequest("buy_target must be positive".into()));
        }
    }
    if let Some(fv) = body.fair_value {
        if fv <= Decimal::ZERO {
            return Err(AppError::BadRequest("fair_value must be positive".into()));
        }
    }
    if let Some(c) = body.conviction {
        if !(0..=10).contains(&c) {
            return Err(AppError::BadRequest("conviction must be 0-10".into()));
        }
    }
    for shares in [body.shares_outstanding_current, body.shares_outstanding_prior] {
        if let Some(s) = shares {
            if s < 0 {
                return Err(AppError::BadRequest(
                    "shares outstanding cannot be negative".into(),
                ));
            }
        }
    }
    if let Some(hint) = &body.allocation_hint {
        if AllocationHint::from_api_str(hint).is_none() {
            return Err(AppError::BadRequest(format!(
                "unknown allocation_hint: {hint}"
            )));
        }
    }
    Ok(())
}

fn validate_patch(patch: &StockPatch) -> Result<(), AppError> {
    if let Some(target) = patch.buy_target {
        if target <= Decimal::ZERO {
            return Err(AppError::BadRequest("buy_target must be positive".into()));
        }
    }
    if let Some(fv) = patch.fair_value {
        if fv <= Decimal::ZERO {
            return Err(AppError::BadRequest("fair_value must be positive".into()));
        }
    }
    if let Some(c) = patch.conviction {
        if !(0..=10).contains(&c) {
            return Err(AppError::BadRequest("conviction must be 0-10".into()));
        }
    }
    for shares in [
        patch.shares_outstanding_current.flatten(),
        patch.shares_outstanding_prior.flatten(),
    ] {
        if let Some(s) = shares {
            if s < 0 {
                return Err(AppError::BadRequest(
                    "shares outstanding cannot be negative".into(),
                ));
            }
        }
    }
    if let Some(Some(hint)) = &patch.allocation_hint {
        if AllocationHint::from_api_str(hint).is_none() {
            return Err(AppError::BadRequest(format!(
                "unknown allocation_hint: {hint}"
            )));
        }
    }
    Ok(())
}

fn validate_scores(scores: &ScoresInput) -> Result<(), AppError> {
    for value in scores.values().into_iter().flatten() {
        if !(0..=10).contains(&value) {
            return Err(AppError::BadRequest("score values must be 0-10".into()));
        }
    }
    Ok(())
}

fn parse_tags(tags: &[TagInput]) -> Result<Vec<(TagKind, String)>, AppError> {
    tags.iter()
        .map(|t| {
            TagKind::from_api_str(&t.kind)
                .map(|kind| (kind, t.value.clone()))
                .ok_or_else(|| AppError::BadRequest(format!("unknown tag kind: {}", t.kind)))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Read model assembly
// ---------------------------------------------------------------------------

async fn build_details(
    state: &AppState,
    stock: Stock,
) -> anyhow::Result<StockWithDetails> {
    let scores = scores_repo::get_by_stock(&state.db, stock.id).await?;
    let thesis = thesis_repo::get_by_stock(&state.db, stock.id).await?;
    let tags = tag_repo::get_by_stock(&state.db, stock.id).await?;
    let triggers = trigger_repo::get_by_stock(&state.db, stock.id).await?;
    let buy_zone_entries = buy_zone_repo::get_by_stock(&state.db, stock.id).await?;
    let price_history =
        price_repo::get_recent(&state.db, stock.id, state.config.price_history_limit).await?;

    let upside_pct = derived::upside_pct(stock.fair_value, stock.current_price);
    let asymmetry_ratio =
        derived::asymmetry_ratio(stock.bull_case_fv, stock.bear_case_fv, stock.current_price);
    let dilution_risk_pct = derived::dilution_risk_pct(
        stock.shares_outstanding_current,
        stock.shares_outstanding_prior,
    );
    let execution_score = scores.as_ref().map(derived::execution_score);
    let balance_sheet_score = scores.as_ref().map(derived::balance_sheet_score);
    let growth_quality_score = scores.as_ref().map(derived::growth_quality_score);
    let buy_zone_stats = history::summarize(&buy_zone_entries);

    Ok(StockWithDetails {
        stock,
        scores,
        thesis,
        tags,
        triggers,
        buy_zone_entries,
        price_history,
        upside_pct,
        asymmetry_ratio,
        dilution_risk_pct,
        execution_score,
        balance_sheet_score,
        growth_quality_score,
        buy_zone_stats,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<StockWithDetails>>, AppError> {
    let stocks = stock_repo::get_all(&state.db).await?;
    gauge!("tracked_stocks").set(stocks.len() as f64);

    let mut results = Vec::with_capacity(stocks.len());
    for stock in stocks {
        results.push(build_details(&state, stock).await?);
    }

    Ok(Json(results))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateStockPayload>,
) -> Result<(StatusCode, Json<Stock>), AppError> {
    let body = payload.stock.unwrap_or(payload.flat);
    validate_body(&body)?;

    // A score row always accompanies a stock; absent fields default to 5.
    let scores = payload.scores.clone().unwrap_or_default();
    validate_scores(&scores)?;
    let parsed_tags = payload.tags.as_deref().map(parse_tags).transpose()?;

    let (Some(ticker), Some(company_name), Some(fair_value), Some(buy_target)) = (
        body.ticker.clone(),
        body.company_name.clone(),
        body.fair_value,
        body.buy_target,
    ) else {
        return Err(AppError::BadRequest(
            "missing required fields: ticker, company_name, fair_value, buy_target".into(),
        ));
    };

    let macro_gated = body.macro_gated.unwrap_or(false);
    let status = classify(body.current_price, buy_target, macro_gated);

    let new = NewStock {
        ticker: ticker.to_uppercase(),
        company_name,
        sector: body.sector,
        current_price: body.current_price,
        fair_value,
        buy_target,
        bear_case_fv: body.bear_case_fv,
        bull_case_fv: body.bull_case_fv,
        peg_ratio: body.peg_ratio,
        ps_ratio: body.ps_ratio,
        ps_ratio_5y_avg: body.ps_ratio_5y_avg,
        shares_outstanding_current: body.shares_outstanding_current,
        shares_outstanding_prior: body.shares_outstanding_prior,
        iv_percentile: body.iv_percentile,
        covered_call_yield: body.covered_call_yield,
        leap_score: body.leap_score,
        conviction: body.conviction.unwrap_or(0),
        allocation_hint: body.allocation_hint,
        macro_gated,
        status,
    };

    let stock = stock_repo::insert(&state.db, &new).await.map_err(|e| {
        if e.as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false)
        {
            AppError::Conflict("a stock with this ticker already exists".into())
        } else {
            AppError::Internal(e.into())
        }
    })?;

    if let Some(thesis) = &payload.thesis {
        thesis_repo::upsert(&state.db, stock.id, thesis).await?;
    }
    scores_repo::upsert(&state.db, stock.id, &scores).await?;
    if let Some(parsed) = &parsed_tags {
        tag_repo::replace_all(&state.db, stock.id, parsed).await?;
    }
    if let Some(triggers) = &payload.triggers {
        for t in triggers.iter().filter_map(|t| t.trigger_text.as_deref()) {
            trigger_repo::create(&state.db, stock.id, t).await?;
        }
    }

    tracing::info!(ticker = %stock.ticker, status = %stock.status, "Stock added to watchlist");

    Ok((StatusCode::CREATED, Json(stock)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StockWithDetails>, AppError> {
    let stock = stock_repo::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("stock not found".into()))?;

    let details = build_details(&state, stock).await?;
    Ok(Json(details))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStockPayload>,
) -> Result<Json<Stock>, AppError> {
    let patch = payload.stock.unwrap_or(payload.flat);
    validate_patch(&patch)?;
    if let Some(scores) = &payload.scores {
        validate_scores(scores)?;
    }
    let parsed_tags = payload.tags.as_deref().map(parse_tags).transpose()?;

    let stock = pipeline::apply_stock_edit(&state.db, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("stock not found".into()))?;

    if let Some(thesis) = &payload.thesis {
        thesis_repo::upsert(&state.db, id, thesis).await?;
    }
    if let Some(scores) = &payload.scores {
        scores_repo::upsert(&state.db, id, scores).await?;
    }
    if let Some(parsed) = &parsed_tags {
        tag_repo::replace_all(&state.db, id, parsed).await?;
    }
    if let Some(triggers) = &payload.triggers {
        trigger_repo::delete_by_stock(&state.db, id).await?;
        for t in triggers.iter().filter_map(|t| t.trigger_text.as_deref()) {
            trigger_repo::create(&state.db, id, t).await?;
        }
    }

    Ok(Json(stock))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = stock_repo::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::NotFound("stock not found".into()));
    }

    Ok(Json(json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RefreshResponse {
    pub message: String,
    pub updated: usize,
    pub total: usize,
    pub results: Vec<RefreshResult>,
}

pub async fn refresh_prices(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, AppError> {
    let Some(client) = &state.quotes else {
        return Err(AppError::BadRequest(
            "ALPHA_VANTAGE_API_KEY is not configured".into(),
        ));
    };

    let results =
        price_refresher::refresh_all(client, &state.db, state.config.quote_delay_secs).await?;
    let updated = results.iter().filter(|r| r.price.is_some()).count();

    Ok(Json(RefreshResponse {
        message: format!("Refreshed {updated} of {} stock prices", results.len()),
        updated,
        total: results.len(),
        results,
    }))
}

pub async fn fetch_fundamentals(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(client) = &state.quotes else {
        return Err(AppError::BadRequest(
            "ALPHA_VANTAGE_API_KEY is not configured".into(),
        ));
    };

    let stock = stock_repo::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("stock not found".into()))?;

    let data = client.get_overview(&stock.ticker).await.map_err(|e| match e {
        QuoteError::RateLimited(msg) => AppError::RateLimited(msg),
        QuoteError::NoData(t) => AppError::NotFound(format!("no fundamentals for {t}")),
        QuoteError::Http(e) => AppError::Internal(e.into()),
    })?;

    let patch = StockPatch {
        ps_ratio: data.ps_ratio.map(Some),
        shares_outstanding_current: data.shares_outstanding.map(Some),
        ..StockPatch::default()
    };
    pipeline::apply_stock_edit(&state.db, id, &patch).await?;

    tracing::info!(ticker = %stock.ticker, "Fundamentals updated");

    Ok(Json(json!({
        "message": format!("Fundamentals updated for {}", stock.ticker),
        "ps_ratio": data.ps_ratio,
        "shares_outstanding": data.shares_outstanding,
        "fetched_at": Utc::now(),
    })))
}
