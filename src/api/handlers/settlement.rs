use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::errors::AppError;
use crate::settlement::{self, Market, SettlementSummary};
use crate::AppState;

/// POST /api/settlement/run: settle pending predictions now.
pub async fn run(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SettlementSummary>>, AppError> {
    let Some(fixtures) = state.fixtures.as_ref() else {
        return Err(AppError::BadRequest(
            "no sports API key configured (SPORTS_API_KEY)".into(),
        ));
    };

    let Ok(_guard) = state.run_lock.try_lock() else {
        return Err(AppError::Conflict("a settlement run is already in progress".into()));
    };

    tracing::info!("Settlement run triggered via API");
    let summary = settlement::run_settlement(
        &state.db,
        fixtures.as_ref(),
        state.config.failure_policy(),
        state.config.settlement_run_timeout(),
    )
    .await?;

    Ok(Json(ApiResponse::ok(summary)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    #[serde(default)]
    pub prediction_type: String,
    pub prediction: String,
    pub goals_home: Option<u32>,
    pub goals_away: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub market: Option<Market>,
    pub correct: bool,
}

/// POST /api/settlement/evaluate: dry-run the evaluator against a given score.
pub async fn evaluate(Json(req): Json<EvaluateRequest>) -> Json<ApiResponse<EvaluateResponse>> {
    let market = settlement::classify_prediction(&req.prediction_type, &req.prediction);
    let correct = settlement::evaluate_prediction(
        &req.prediction_type,
        &req.prediction,
        req.goals_home,
        req.goals_away,
    );

    Json(ApiResponse::ok(EvaluateResponse { market, correct }))
}
