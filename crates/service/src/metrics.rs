use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static BACKEND_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "backend_requests_total",
        "Backend calls by entity, operation and outcome",
        &["entity", "op", "outcome"]
    )
    .expect("register backend_requests_total")
});

pub static PAGE_LOAD_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "page_load_duration_seconds",
        "Page container load duration in seconds",
        &["page"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register page_load_duration")
});

pub fn record_backend_call(entity: &str, op: &str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    BACKEND_REQUESTS_TOTAL.with_label_values(&[entity, op, outcome]).inc();
}

pub fn observe_page_load(page: &str, seconds: f64) {
    PAGE_LOAD_DURATION.with_label_values(&[page]).observe(seconds);
}

/// Prometheus text exposition of every registered metric.
pub fn encode_metrics() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("metrics encode error: {e}"))?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}
