use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

use super::updater::{run_settlement, FailurePolicy};
use crate::sports::FixtureSource;

/// Failed runs double the wait, up to `2^MAX_BACKOFF_DOUBLINGS` intervals.
const MAX_BACKOFF_DOUBLINGS: u32 = 16;

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval: Duration,
    pub run_timeout: Duration,
    pub max_backoff: Duration,
    pub policy: FailurePolicy,
}

/// Settle pending predictions on a fixed period. Runs once immediately.
///
/// `run_lock` is shared with the manual trigger endpoint so two runs never
/// overlap inside one process.
pub async fn run_settlement_poller(
    pool: PgPool,
    fixtures: Arc<dyn FixtureSource>,
    run_lock: Arc<Mutex<()>>,
    config: PollerConfig,
) {
    tracing::info!(
        interval_secs = config.interval.as_secs(),
        run_timeout_secs = config.run_timeout.as_secs(),
        policy = ?config.policy,
        "Settlement poller started"
    );

    let mut consecutive_failures: u32 = 0;

    loop {
        {
            let _guard = run_lock.lock().await;
            let run = run_settlement(&pool, fixtures.as_ref(), config.policy, config.run_timeout);
            match run.await {
                Ok(summary) => {
                    consecutive_failures = 0;
                    tracing::debug!(updated = summary.updated, "Settlement poller tick done");
                }
                Err(e) => {
                    consecutive_failures = consecutive_failures.saturating_add(1);
                    tracing::error!(
                        error = %e,
                        consecutive_failures,
                        "Settlement run failed"
                    );
                }
            }
        }

        let delay = next_delay(config.interval, config.max_backoff, consecutive_failures);
        if consecutive_failures > 0 {
            tracing::warn!(delay_secs = delay.as_secs(), "Backing off before next settlement run");
        }
        sleep(delay).await;
    }
}

/// Wait before the next run: the plain interval after a success, doubling per
/// consecutive failure, capped at `max_backoff` but never below `interval`.
pub fn next_delay(
    interval: Duration,
    max_backoff: Duration,
    consecutive_failures: u32,
) -> Duration {
    if consecutive_failures == 0 {
        return interval;
    }

    let factor = 1u32 << consecutive_failures.min(MAX_BACKOFF_DOUBLINGS);
    interval.saturating_mul(factor).min(max_backoff).max(interval)
}
