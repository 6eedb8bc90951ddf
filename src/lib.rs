pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod settlement;
pub mod sports;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::sports::FixtureSource;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    /// `None` when no API-Sports key is configured.
    pub fixtures: Option<Arc<dyn FixtureSource>>,
    /// Held for the duration of a settlement run.
    pub run_lock: Arc<Mutex<()>>,
}
