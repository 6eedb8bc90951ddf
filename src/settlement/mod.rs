pub mod evaluator;
pub mod poller;
pub mod store;
pub mod updater;

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::sports::SportsApiError;

pub use evaluator::{classify_prediction, evaluate_prediction, Market, Score};
pub use poller::{run_settlement_poller, PollerConfig};
pub use store::PredictionStore;
pub use updater::{run_settlement, update_pending_predictions, FailurePolicy, SettlementSummary};

#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("fixture lookup failed for prediction {prediction_id}: {source}")]
    Lookup {
        prediction_id: Uuid,
        #[source]
        source: SportsApiError,
    },

    #[error("prediction store error: {0}")]
    Store(#[from] anyhow::Error),

    #[error("settlement run exceeded its {0:?} budget")]
    TimedOut(Duration),
}
