use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register counters so they appear even before the first increment.
    counter!("settlement_runs_total").absolute(0);
    counter!("settlement_runs_failed_total").absolute(0);
    counter!("predictions_settled_total", "outcome" => "won").absolute(0);
    counter!("predictions_settled_total", "outcome" => "lost").absolute(0);
    counter!("predictions_skipped_total").absolute(0);
    counter!("fixture_lookups_total").absolute(0);
    counter!("fixture_lookup_errors_total").absolute(0);

    gauge!("pending_predictions").set(0.0);

    // Histogram is lazily created on first record; force creation.
    histogram!("settlement_run_seconds").record(0.0);

    Ok(handle)
}

/// A handle backed by a recorder that is not installed globally. Renders an
/// empty payload; used where a process-wide recorder already exists or is unwanted.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
