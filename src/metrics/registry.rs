// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // INBOUND REQUEST METRICS
    // ============================================================================

    /// Inbound requests by endpoint and outcome
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("relay_requests_total", "Total inbound relay requests"),
        &["endpoint", "outcome"], // outcome: success, client_error, server_error
        REGISTRY
    ).unwrap();

    /// End-to-end handling time
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("relay_request_duration_seconds", "Inbound request duration in seconds")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["endpoint"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // GATEWAY METRICS
    // ============================================================================

    /// Outbound chat-completions calls
    pub static ref GATEWAY_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("gateway_calls_total", "Total chat-completions calls"),
        &["model", "outcome"], // outcome: success, status, timeout, network, malformed
        REGISTRY
    ).unwrap();

    /// Outbound call latency
    pub static ref GATEWAY_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("gateway_call_duration_seconds", "Chat-completions call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0]),
        &["model"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // IMAGE METRICS
    // ============================================================================

    /// Images refused before any outbound call
    pub static ref IMAGE_REJECTIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("image_rejections_total", "Images rejected before reaching the gateway"),
        &["reason"], // reason: invalid_data, too_large, undecodable
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
