//! Batched fan-out of the dispatcher over a recipient list.
//!
//! Recipients are partitioned into fixed-size batches. Every dispatch
//! in a batch runs concurrently and the batch is joined as a barrier
//! before the next one starts, with a fixed pacing pause in between.
//! Per-batch concurrency bounds the parallel transport calls; the pause
//! respects gateway rate limits invisible to this core. One recipient's
//! failure never aborts the batch or the run.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use uuid::Uuid;

use crate::config::DispatchConfig;
use crate::domain::template::RenderContext;
use crate::metrics::BulkMetrics;

use super::dispatcher::{Dispatcher, Recipient};

/// Outcome for a single recipient of a bulk send.
#[derive(Debug, Clone, Serialize)]
pub struct RecipientOutcome {
    pub recipient: String,
    pub success: bool,
    /// Pre-flight or transport error text
    pub error: Option<String>,
    /// Absent when the send failed pre-flight (nothing was attempted)
    pub log_id: Option<Uuid>,
}

/// Aggregate report for one bulk run. `succeeded + failed == total`.
#[derive(Debug, Clone, Serialize)]
pub struct BulkReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<RecipientOutcome>,
}

pub struct BulkController {
    dispatcher: Arc<Dispatcher>,
    batch_size: usize,
    batch_pause: Duration,
}

impl BulkController {
    pub fn new(dispatcher: Arc<Dispatcher>, config: &DispatchConfig) -> Self {
        Self {
            dispatcher,
            batch_size: config.batch_size.max(1),
            batch_pause: Duration::from_millis(config.batch_pause_ms),
        }
    }

    /// Send one message kind to every recipient.
    ///
    /// `context_for` builds the per-recipient variable map, so bulk
    /// messages can still be personalized.
    #[tracing::instrument(
        name = "bulk.send_bulk",
        skip(self, recipients, context_for),
        fields(group = %group, kind = %kind, recipient_count = recipients.len())
    )]
    pub async fn send_bulk<F>(
        &self,
        recipients: &[Recipient],
        group: &str,
        kind: &str,
        context_for: F,
    ) -> BulkReport
    where
        F: Fn(&Recipient) -> RenderContext,
    {
        let mut results = Vec::with_capacity(recipients.len());
        let batch_count = recipients.len().div_ceil(self.batch_size);

        for (index, batch) in recipients.chunks(self.batch_size).enumerate() {
            BulkMetrics::record_batch();

            let outcomes = join_all(batch.iter().map(|recipient| {
                let ctx = context_for(recipient);
                async move {
                    match self.dispatcher.send(recipient, group, kind, &ctx, None).await {
                        Ok(report) => RecipientOutcome {
                            recipient: recipient.address.clone(),
                            success: report.success,
                            error: report.error,
                            log_id: Some(report.log_id),
                        },
                        Err(e) => RecipientOutcome {
                            recipient: recipient.address.clone(),
                            success: false,
                            error: Some(e.to_string()),
                            log_id: None,
                        },
                    }
                }
            }))
            .await;

            results.extend(outcomes);

            // Pace between batches, never after the last one
            if index + 1 < batch_count {
                tokio::time::sleep(self.batch_pause).await;
            }
        }

        BulkMetrics::record_recipients(results.len());

        let succeeded = results.iter().filter(|r| r.success).count();
        let report = BulkReport {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        };

        tracing::info!(
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed,
            batches = batch_count,
            "Bulk send completed"
        );

        report
    }
}
