use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder,
};

pub const OUTCOME_ANSWERED: &str = "answered";
pub const OUTCOME_NO_USER_MESSAGE: &str = "no_user_message";
pub const OUTCOME_EMBEDDING_FAILED: &str = "embedding_failed";
pub const OUTCOME_SEARCH_FAILED: &str = "search_failed";
pub const OUTCOME_GENERATION_FAILED: &str = "generation_failed";
pub const OUTCOME_ERROR: &str = "error";

pub static ANSWERS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "answers_total",
        "Chat completion requests by pipeline outcome",
        &["outcome"]
    )
    .expect("answers_total can be registered")
});

pub static CITATIONS_ATTACHED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "citations_attached_total",
        "Source citations appended to answers"
    )
    .expect("citations_attached_total can be registered")
});

pub fn record_outcome(outcome: &str) {
    ANSWERS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Text exposition of the default registry.
pub fn gather() -> (Vec<u8>, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    (buffer, encoder.format_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_show_up_in_exposition() {
        record_outcome(OUTCOME_SEARCH_FAILED);
        CITATIONS_ATTACHED.inc_by(0);

        let (body, content_type) = gather();
        let body = String::from_utf8(body).unwrap();

        assert!(content_type.starts_with("text/plain"));
        assert!(body.contains("answers_total{outcome=\"search_failed\"}"));
        assert!(body.contains("citations_attached_total"));
    }
}
