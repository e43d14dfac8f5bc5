//! Prometheus metrics for the dispatch core.
//!
//! Counters cover the send path (per channel class), pre-flight
//! failures, retries, and bulk fan-out activity.

mod helpers;

pub use helpers::{encode_metrics, BulkMetrics, DispatchMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "outbound_notify";

lazy_static! {
    // ============================================================================
    // Send path
    // ============================================================================

    /// Messages handed to the transport, by channel class
    pub static ref MESSAGES_SENT_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_messages_sent_total", METRIC_PREFIX),
        "Total messages accepted by the transport",
        &["channel"]
    ).unwrap();

    /// Messages the transport rejected, by channel class
    pub static ref MESSAGES_FAILED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_messages_failed_total", METRIC_PREFIX),
        "Total messages rejected by the transport",
        &["channel"]
    ).unwrap();

    /// Sends aborted before any transport call (missing template, store error)
    pub static ref PREFLIGHT_FAILURES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_preflight_failures_total", METRIC_PREFIX),
        "Total sends aborted before a transport call was attempted"
    ).unwrap();

    /// Retry attempts against existing log entries
    pub static ref RETRIES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_retries_total", METRIC_PREFIX),
        "Total retry attempts"
    ).unwrap();

    // ============================================================================
    // Bulk fan-out
    // ============================================================================

    /// Bulk batches executed
    pub static ref BULK_BATCHES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_bulk_batches_total", METRIC_PREFIX),
        "Total bulk batches executed"
    ).unwrap();

    /// Recipients processed through bulk sends
    pub static ref BULK_RECIPIENTS_TOTAL: IntCounter = register_int_counter!(
        format!("{}_bulk_recipients_total", METRIC_PREFIX),
        "Total recipients processed by the bulk controller"
    ).unwrap();
}
