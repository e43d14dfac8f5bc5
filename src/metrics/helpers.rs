//! Helper wrappers around the raw metric statics.

use prometheus::{Encoder, TextEncoder};

use crate::domain::channel::ChannelClass;

use super::{
    BULK_BATCHES_TOTAL, BULK_RECIPIENTS_TOTAL, MESSAGES_FAILED_TOTAL, MESSAGES_SENT_TOTAL,
    PREFLIGHT_FAILURES_TOTAL, RETRIES_TOTAL,
};

/// Encode all registered metrics in Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Send-path metric helpers.
pub struct DispatchMetrics;

impl DispatchMetrics {
    pub fn record_sent(channel: ChannelClass) {
        MESSAGES_SENT_TOTAL
            .with_label_values(&[channel.as_str()])
            .inc();
    }

    pub fn record_failed(channel: ChannelClass) {
        MESSAGES_FAILED_TOTAL
            .with_label_values(&[channel.as_str()])
            .inc();
    }

    pub fn record_preflight_failure() {
        PREFLIGHT_FAILURES_TOTAL.inc();
    }

    pub fn record_retry() {
        RETRIES_TOTAL.inc();
    }
}

/// Bulk fan-out metric helpers.
pub struct BulkMetrics;

impl BulkMetrics {
    pub fn record_batch() {
        BULK_BATCHES_TOTAL.inc();
    }

    pub fn record_recipients(count: usize) {
        BULK_RECIPIENTS_TOTAL.inc_by(count as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_metrics() {
        DispatchMetrics::record_sent(ChannelClass::Short);
        let encoded = encode_metrics().unwrap();
        assert!(encoded.contains("outbound_notify_messages_sent_total"));
    }
}
