use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    let sports_api = if state.fixtures.is_some() {
        "configured"
    } else {
        "missing"
    };

    if db_ok {
        (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "sports_api": sports_api })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unhealthy", "db": "disconnected", "sports_api": sports_api })),
        )
    }
}
