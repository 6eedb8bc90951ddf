use std::time::{Duration, Instant};

use metrics::{counter, gauge, histogram};
use serde::{Deserialize, Serialize};

use super::evaluator::evaluate_prediction;
use super::store::PredictionStore;
use super::SettlementError;
use crate::models::{Prediction, PredictionStatus};
use crate::sports::{lookup_fixture, Fixture, FixtureSource};

/// What to do when one prediction's lookup or write fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the run and return the error. Later predictions wait for the next run.
    #[default]
    Abort,
    /// Log, count under `failed`, leave the prediction pending and move on.
    Isolate,
}

/// Aggregate result of one pass over the pending predictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementSummary {
    pub updated: usize,
    pub won: usize,
    pub lost: usize,
    pub skipped: usize,
    pub matches_found: usize,
    pub match_ids: Vec<i64>,
    pub failed: usize,
}

enum ItemOutcome {
    /// No fixture matched; stays pending.
    Skipped,
    /// Fixture found but not finished; stays pending.
    InPlay(Fixture),
    Settled {
        fixture: Fixture,
        status: PredictionStatus,
        changed: bool,
    },
}

impl SettlementSummary {
    fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Skipped => self.skipped += 1,
            ItemOutcome::InPlay(fixture) => self.found(&fixture),
            ItemOutcome::Settled {
                fixture,
                status,
                changed,
            } => {
                self.found(&fixture);
                if !changed {
                    return;
                }
                self.updated += 1;
                match status {
                    PredictionStatus::Won => self.won += 1,
                    PredictionStatus::Lost => self.lost += 1,
                    PredictionStatus::Pending => {}
                }
            }
        }
    }

    fn found(&mut self, fixture: &Fixture) {
        self.matches_found += 1;
        self.match_ids.push(fixture.id);
    }
}

/// Settle every pending prediction whose match has finished.
///
/// Predictions are processed one at a time, in the order the store returns
/// them. Under `FailurePolicy::Abort` the first error ends the run.
pub async fn update_pending_predictions<S, F>(
    store: &S,
    fixtures: &F,
    policy: FailurePolicy,
) -> Result<SettlementSummary, SettlementError>
where
    S: PredictionStore + ?Sized,
    F: FixtureSource + ?Sized,
{
    let pending = store.pending_predictions().await?;
    gauge!("pending_predictions").set(pending.len() as f64);

    tracing::info!(pending = pending.len(), policy = ?policy, "Settlement run started");

    let mut summary = SettlementSummary::default();

    for prediction in &pending {
        match settle_one(store, fixtures, prediction).await {
            Ok(outcome) => summary.record(outcome),
            Err(e) => match policy {
                FailurePolicy::Abort => {
                    tracing::error!(
                        error = %e,
                        prediction_id = %prediction.id,
                        "Settlement run aborted"
                    );
                    return Err(e);
                }
                FailurePolicy::Isolate => {
                    tracing::warn!(
                        error = %e,
                        prediction_id = %prediction.id,
                        "Prediction failed, continuing"
                    );
                    summary.failed += 1;
                }
            },
        }
    }

    tracing::info!(
        updated = summary.updated,
        won = summary.won,
        lost = summary.lost,
        skipped = summary.skipped,
        matches_found = summary.matches_found,
        failed = summary.failed,
        "Settlement run finished"
    );

    Ok(summary)
}

/// One settlement run under a wall-clock budget, with run-level metrics.
pub async fn run_settlement<S, F>(
    store: &S,
    fixtures: &F,
    policy: FailurePolicy,
    budget: Duration,
) -> Result<SettlementSummary, SettlementError>
where
    S: PredictionStore + ?Sized,
    F: FixtureSource + ?Sized,
{
    let started = Instant::now();
    counter!("settlement_runs_total").increment(1);

    let run = update_pending_predictions(store, fixtures, policy);
    let result = match tokio::time::timeout(budget, run).await {
        Ok(result) => result,
        Err(_) => Err(SettlementError::TimedOut(budget)),
    };

    histogram!("settlement_run_seconds").record(started.elapsed().as_secs_f64());
    if result.is_err() {
        counter!("settlement_runs_failed_total").increment(1);
    }

    result
}

async fn settle_one<S, F>(
    store: &S,
    fixtures: &F,
    prediction: &Prediction,
) -> Result<ItemOutcome, SettlementError>
where
    S: PredictionStore + ?Sized,
    F: FixtureSource + ?Sized,
{
    counter!("fixture_lookups_total").increment(1);

    let found = match prediction.fixture_id {
        Some(id) => fixtures.fixture_by_id(id).await,
        None => {
            lookup_fixture(
                fixtures,
                &prediction.home_team,
                &prediction.away_team,
                &prediction.match_date,
            )
            .await
        }
    };

    let fixture = match found {
        Ok(Some(f)) => f,
        Ok(None) => {
            counter!("predictions_skipped_total").increment(1);
            tracing::debug!(
                prediction_id = %prediction.id,
                home = %prediction.home_team,
                away = %prediction.away_team,
                date = %prediction.match_date,
                "No fixture matched, leaving pending"
            );
            return Ok(ItemOutcome::Skipped);
        }
        Err(source) => {
            counter!("fixture_lookup_errors_total").increment(1);
            return Err(SettlementError::Lookup {
                prediction_id: prediction.id,
                source,
            });
        }
    };

    if !fixture.is_finished() {
        if prediction.fixture_id.is_none() {
            store.link_fixture(prediction.id, fixture.id).await?;
        }
        tracing::debug!(
            prediction_id = %prediction.id,
            fixture_id = fixture.id,
            status = %fixture.status_short,
            "Match not finished yet"
        );
        return Ok(ItemOutcome::InPlay(fixture));
    }

    let correct = evaluate_prediction(
        &prediction.prediction_type,
        &prediction.prediction,
        fixture.goals_home,
        fixture.goals_away,
    );
    let status = PredictionStatus::from_outcome(correct);
    let changed = store.settle(prediction.id, status).await?;

    if changed {
        counter!("predictions_settled_total", "outcome" => status.as_str()).increment(1);
        tracing::info!(
            prediction_id = %prediction.id,
            fixture_id = fixture.id,
            prediction = %prediction.prediction,
            goals_home = ?fixture.goals_home,
            goals_away = ?fixture.goals_away,
            status = %status,
            "Prediction settled"
        );
    } else {
        tracing::warn!(
            prediction_id = %prediction.id,
            "Prediction was settled elsewhere during this run"
        );
    }

    Ok(ItemOutcome::Settled {
        fixture,
        status,
        changed,
    })
}
