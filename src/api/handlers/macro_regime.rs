use axum::extract::State;
use axum::Json;

use crate::db::macro_repo::{self, MacroRegimeInput};
use crate::errors::AppError;
use crate::models::MacroRegime;
use crate::AppState;

pub async fn get(State(state): State<AppState>) -> Result<Json<MacroRegime>, AppError> {
    let regime = macro_repo::get_or_init(&state.db).await?;
    Ok(Json(regime))
}

pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<MacroRegimeInput>,
) -> Result<Json<MacroRegime>, AppError> {
    if let Some(pct) = input.risk_on_pct {
        if !(0..=100).contains(&pct) {
            return Err(AppError::BadRequest("risk_on_pct must be 0-100".into()));
        }
    }

    let regime = macro_repo::update(&state.db, &input).await?;
    Ok(Json(regime))
}
