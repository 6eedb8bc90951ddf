use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use metrics::gauge;

use crate::db::prediction_repo;
use crate::models::PredictionStatus;
use crate::AppState;

/// GET /metrics: Prometheus scrape. The pending gauge is refreshed from the
/// database first so it is accurate between settlement runs.
pub async fn render(State(state): State<AppState>) -> impl IntoResponse {
    match prediction_repo::count_by_status(&state.db, PredictionStatus::Pending).await {
        Ok(count) => gauge!("pending_predictions").set(count as f64),
        Err(e) => tracing::debug!(error = %e, "Could not refresh pending_predictions gauge"),
    }

    let body = state.metrics_handle.render();
    ([(CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}
