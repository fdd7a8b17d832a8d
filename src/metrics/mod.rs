// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics, GATEWAY_CALLS, GATEWAY_DURATION, IMAGE_REJECTIONS, REQUESTS_TOTAL,
    REQUEST_DURATION,
};

/// Helper to record an inbound request
pub fn record_request(endpoint: &str, status_code: u16, duration_secs: f64) {
    let outcome = match status_code {
        200..=399 => "success",
        400..=499 => "client_error",
        _ => "server_error",
    };

    REQUESTS_TOTAL.with_label_values(&[endpoint, outcome]).inc();
    REQUEST_DURATION
        .with_label_values(&[endpoint])
        .observe(duration_secs);
}

/// Helper to record one gateway call
pub fn record_gateway_call(model: &str, outcome: &str, duration_secs: f64) {
    GATEWAY_CALLS.with_label_values(&[model, outcome]).inc();
    GATEWAY_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

pub fn record_image_rejection(reason: &str) {
    IMAGE_REJECTIONS.with_label_values(&[reason]).inc();
}
