use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::prediction_repo;
use crate::models::{Prediction, PredictionStatus};

/// Persistence the settlement run needs. Postgres in production.
#[async_trait]
pub trait PredictionStore: Send + Sync {
    async fn pending_predictions(&self) -> anyhow::Result<Vec<Prediction>>;

    /// Returns `false` when the prediction was no longer pending.
    async fn settle(&self, id: Uuid, status: PredictionStatus) -> anyhow::Result<bool>;

    async fn link_fixture(&self, id: Uuid, fixture_id: i64) -> anyhow::Result<()>;
}

#[async_trait]
impl PredictionStore for PgPool {
    async fn pending_predictions(&self) -> anyhow::Result<Vec<Prediction>> {
        prediction_repo::get_pending_predictions(self).await
    }

    async fn settle(&self, id: Uuid, status: PredictionStatus) -> anyhow::Result<bool> {
        prediction_repo::settle_prediction(self, id, status).await
    }

    async fn link_fixture(&self, id: Uuid, fixture_id: i64) -> anyhow::Result<()> {
        prediction_repo::link_fixture(self, id, fixture_id).await
    }
}
