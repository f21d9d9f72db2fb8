use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("price_updates_total").absolute(0);
    counter!("quote_fetch_failures_total").absolute(0);
    counter!("buy_zone_enters_total").absolute(0);
    counter!("buy_zone_exits_total").absolute(0);

    gauge!("tracked_stocks").set(0.0);

    // Histogram is lazily created on first record; force creation.
    histogram!("refresh_cycle_seconds").record(0.0);

    handle
}
