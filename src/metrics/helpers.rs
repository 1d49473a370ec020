//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, HistogramTimer, TextEncoder};

use super::{NOTIFICATION_OPERATIONS_TOTAL, STORE_ERRORS_TOTAL, STORE_OPERATION_LATENCY};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording manager operation outcomes
pub struct OperationMetrics;

impl OperationMetrics {
    /// Record one completed operation
    pub fn record(operation: &str, outcome: &str) {
        NOTIFICATION_OPERATIONS_TOTAL
            .with_label_values(&[operation, outcome])
            .inc();
    }
}

/// Helper struct for store metrics
pub struct StoreMetrics;

impl StoreMetrics {
    /// Start a latency timer; the sample is recorded when the timer drops
    pub fn start_timer(backend: &str, operation: &str) -> HistogramTimer {
        STORE_OPERATION_LATENCY
            .with_label_values(&[backend, operation])
            .start_timer()
    }

    /// Record a store error
    pub fn record_error(backend: &str, operation: &str) {
        STORE_ERRORS_TOTAL
            .with_label_values(&[backend, operation])
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_metrics() {
        OperationMetrics::record("create", "created");
        let count = NOTIFICATION_OPERATIONS_TOTAL
            .with_label_values(&["create", "created"])
            .get();
        assert!(count >= 1);
    }

    #[test]
    fn test_store_metrics() {
        {
            let _timer = StoreMetrics::start_timer("memory", "insert");
        }
        StoreMetrics::record_error("memory", "insert");
        // Just verify no panics
    }

    #[test]
    fn test_encode_metrics() {
        OperationMetrics::record("list", "listed");
        let output = encode_metrics().unwrap();
        assert!(output.contains("ara_notification_operations_total"));
    }
}
