//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the ticketdesk server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Query executions by operation and outcome
//! - Size of the loaded dataset

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "ticketdesk_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("ticketdesk_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "ticketdesk_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Query Metrics
// =============================================================================

/// Query executions. `outcome` is the result kind or `error`.
pub static QUERIES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("ticketdesk_queries_total", "Total query executions"),
        &["operation", "outcome"],
    )
    .unwrap()
});

/// Tickets in the loaded dataset.
pub static DATASET_TICKETS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "ticketdesk_dataset_tickets",
        "Number of tickets in the loaded dataset",
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    // HTTP
    registry.register(Box::new(HTTP_REQUEST_DURATION.clone())).unwrap();
    registry.register(Box::new(HTTP_REQUESTS_TOTAL.clone())).unwrap();
    registry.register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone())).unwrap();

    // Queries
    registry.register(Box::new(QUERIES_TOTAL.clone())).unwrap();
    registry.register(Box::new(DATASET_TICKETS.clone())).unwrap();
}

/// Record one query execution.
///
/// Unknown operation names are folded into `unknown` to keep label
/// cardinality bounded.
pub fn record_query(operation: Option<&str>, outcome: &str) {
    QUERIES_TOTAL
        .with_label_values(&[operation.unwrap_or("unknown"), outcome])
        .inc();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so gauges reflect current values.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    DATASET_TICKETS.set(state.dispatcher().dataset().len() as i64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_contains_registered_metrics() {
        DATASET_TICKETS.set(3);
        record_query(Some("count"), "count");

        let text = encode_metrics();
        assert!(text.contains("ticketdesk_dataset_tickets 3"));
        assert!(
            text.contains("ticketdesk_queries_total{operation=\"count\",outcome=\"count\"}")
        );
    }

    #[test]
    fn test_unknown_operation_label() {
        record_query(None, "error");
        let value = QUERIES_TOTAL.with_label_values(&["unknown", "error"]).get();
        assert!(value >= 1);
    }
}
