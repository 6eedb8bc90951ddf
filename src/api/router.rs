use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::auth::require_auth;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes (no authentication)
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Protected API routes (Bearer token when API_TOKEN is set)
    let protected = Router::new()
        // Predictions
        .route("/api/predictions", get(handlers::predictions::list))
        .route("/api/predictions/:id", get(handlers::predictions::detail))
        // Settlement
        .route("/api/settlement/run", post(handlers::settlement::run))
        .route("/api/settlement/evaluate", post(handlers::settlement::evaluate))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
