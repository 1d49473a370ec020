//! Prometheus metrics for the notification registry.
//!
//! - Operation metrics (per manager operation and outcome)
//! - Store metrics (latency and errors per backend operation)

mod helpers;

pub use helpers::{encode_metrics, OperationMetrics, StoreMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "ara";

lazy_static! {
    // ============================================================================
    // Operation Metrics
    // ============================================================================

    /// Manager operations by outcome
    pub static ref NOTIFICATION_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notification_operations_total", METRIC_PREFIX),
        "Total notification operations by outcome",
        &["operation", "outcome"]
    ).unwrap();

    // ============================================================================
    // Store Metrics
    // ============================================================================

    /// Store call latency
    pub static ref STORE_OPERATION_LATENCY: HistogramVec = register_histogram_vec!(
        format!("{}_notification_store_duration_seconds", METRIC_PREFIX),
        "Notification store operation latency in seconds",
        &["backend", "operation"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    ).unwrap();

    /// Store call failures
    pub static ref STORE_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notification_store_errors_total", METRIC_PREFIX),
        "Total notification store operation errors",
        &["backend", "operation"]
    ).unwrap();
}
