use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total HTTP requests served. Labels: route, status.
pub const REQUESTS_TOTAL: &str = "rateboard_requests_total";

/// Histogram: request latency in seconds. Labels: route.
pub const REQUEST_DURATION_SECONDS: &str = "rateboard_request_duration_seconds";

/// Counter: rate lookups. Labels: outcome (available/unavailable).
pub const RATE_QUERIES_TOTAL: &str = "rateboard_rate_queries_total";

/// Counter: accepted full-table replacements.
pub const RATE_UPDATES_TOTAL: &str = "rateboard_rate_updates_total";

/// Counter: updates rejected by the normalizer.
pub const RATE_UPDATES_REJECTED_TOTAL: &str = "rateboard_rate_updates_rejected_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}
