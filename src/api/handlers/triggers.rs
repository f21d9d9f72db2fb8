use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::{stock_repo, trigger_repo};
use crate::errors::AppError;
use crate::models::TriggerAlert;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTriggerPayload {
    pub trigger_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTriggerPayload {
    pub trigger_text: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    Path(stock_id): Path<Uuid>,
) -> Result<Json<Vec<TriggerAlert>>, AppError> {
    let triggers = trigger_repo::get_by_stock(&state.db, stock_id).await?;
    Ok(Json(triggers))
}

pub async fn create(
    State(state): State<AppState>,
    Path(stock_id): Path<Uuid>,
    Json(payload): Json<CreateTriggerPayload>,
) -> Result<(StatusCode, Json<TriggerAlert>), AppError> {
    let text = payload
        .trigger_text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("trigger_text required".into()))?;

    if stock_repo::get_by_id(&state.db, stock_id).await?.is_none() {
        return Err(AppError::NotFound("stock not found".into()));
    }

    let trigger = trigger_repo::create(&state.db, stock_id, &text).await?;
    Ok((StatusCode::CREATED, Json(trigger)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(trigger_id): Path<Uuid>,
    Json(payload): Json<UpdateTriggerPayload>,
) -> Result<Json<TriggerAlert>, AppError> {
    let trigger = trigger_repo::update(
        &state.db,
        trigger_id,
        payload.trigger_text.as_deref(),
        payload.is_active,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("trigger not found".into()))?;

    Ok(Json(trigger))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(trigger_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = trigger_repo::delete(&state.db, trigger_id).await?;
    if !deleted {
        return Err(AppError::NotFound("trigger not found".into()));
    }

    Ok(Json(json!({ "success": true })))
}
