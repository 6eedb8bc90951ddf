use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::ApiResponse;
use crate::db::prediction_repo;
use crate::errors::AppError;
use crate::models::{Prediction, PredictionStatus};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// GET /api/predictions?status=pending|won|lost
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Prediction>>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<PredictionStatus>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let predictions = prediction_repo::get_predictions(&state.db, status).await?;
    Ok(Json(ApiResponse::ok(predictions)))
}

/// GET /api/predictions/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Prediction>>, AppError> {
    match prediction_repo::get_prediction(&state.db, id).await? {
        Some(prediction) => Ok(Json(ApiResponse::ok(prediction))),
        None => Err(AppError::NotFound(format!("prediction {id}"))),
    }
}
