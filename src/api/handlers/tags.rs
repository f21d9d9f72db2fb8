use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::stocks::TagInput;
use crate::db::{stock_repo, tag_repo};
use crate::errors::AppError;
use crate::models::{StockTag, TagKind};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReplaceTagsPayload {
    pub tags: Option<Vec<TagInput>>,
}

pub async fn list(
    State(state): State<AppState>,
    Path(stock_id): Path<Uuid>,
) -> Result<Json<Vec<StockTag>>, AppError> {
    let tags = tag_repo::get_by_stock(&state.db, stock_id).await?;
    Ok(Json(tags))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(stock_id): Path<Uuid>,
    Json(payload): Json<ReplaceTagsPayload>,
) -> Result<Json<Vec<StockTag>>, AppError> {
    if stock_repo::get_by_id(&state.db, stock_id).await?.is_none() {
        return Err(AppError::NotFound("stock not found".into()));
    }

    let parsed: Vec<(TagKind, String)> = payload
        .tags
        .unwrap_or_default()
        .iter()
        .map(|t| {
            TagKind::from_api_str(&t.kind)
                .map(|kind| (kind, t.value.clone()))
                .ok_or_else(|| AppError::BadRequest(format!("unknown tag kind: {}", t.kind)))
        })
        .collect::<Result<_, _>>()?;

    let tags = tag_repo::replace_all(&state.db, stock_id, &parsed).await?;
    Ok(Json(tags))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(tag_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = tag_repo::delete(&state.db, tag_id).await?;
    if !deleted {
        return Err(AppError::NotFound("tag not found".into()));
    }

    Ok(Json(json!({ "success": true })))
}
