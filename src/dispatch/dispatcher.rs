use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::config::DispatchConfig;
use crate::domain::channel::ChannelClass;
use crate::domain::log::{DeliveryLog, NewLogEntry};
use crate::domain::template::{render, RenderContext, TemplateResolver};
use crate::error::{DispatchError, Result};
use crate::metrics::DispatchMetrics;
use crate::transport::MessageTransport;

/// A destination address plus an optional display name for the log.
#[derive(Debug, Clone)]
pub struct Recipient {
    pub address: String,
    pub name: Option<String>,
}

impl Recipient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    pub fn named(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: Some(name.into()),
        }
    }
}

/// Result of one dispatched message.
///
/// `success: false` means the transport rejected the attempt; the log
/// entry behind `log_id` is already in `failed` state and can be fed to
/// [`Dispatcher::retry`].
#[derive(Debug, Clone, Serialize)]
pub struct SendReport {
    pub success: bool,
    pub provider_message_id: Option<String>,
    pub error: Option<String>,
    pub log_id: Uuid,
    pub channel: ChannelClass,
}

/// Result of a retry against an existing log entry.
#[derive(Debug, Clone, Serialize)]
pub struct RetryReport {
    pub success: bool,
    pub provider_message_id: Option<String>,
    pub error: Option<String>,
}

/// Counters for the dispatcher.
#[derive(Debug, Default)]
pub struct DispatcherStats {
    /// Transport calls attempted
    pub total_attempts: AtomicU64,
    /// Transport calls the provider accepted
    pub sent: AtomicU64,
    /// Transport calls the provider rejected
    pub failed: AtomicU64,
    /// Sends aborted before any transport call
    pub preflight_failures: AtomicU64,
    /// Retry attempts
    pub retries: AtomicU64,
}

impl DispatcherStats {
    pub fn snapshot(&self) -> DispatcherStatsSnapshot {
        DispatcherStatsSnapshot {
            total_attempts: self.total_attempts.load(Ordering::Relaxed),
            sent: self.sent.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            preflight_failures: self.preflight_failures.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of dispatcher statistics.
#[derive(Debug, Clone, Serialize)]
pub struct DispatcherStatsSnapshot {
    pub total_attempts: u64,
    pub sent: u64,
    pub failed: u64,
    pub preflight_failures: u64,
    pub retries: u64,
}

/// Orchestrates one message: resolve → render → classify → log pending
/// → transport → log outcome.
///
/// Synchronous request/response per message; concurrency is introduced
/// only by the bulk controller wrapping this type.
pub struct Dispatcher {
    resolver: TemplateResolver,
    log: Arc<dyn DeliveryLog>,
    transport: Arc<dyn MessageTransport>,
    config: DispatchConfig,
    stats: DispatcherStats,
}

impl Dispatcher {
    pub fn new(
        resolver: TemplateResolver,
        log: Arc<dyn DeliveryLog>,
        transport: Arc<dyn MessageTransport>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            resolver,
            log,
            transport,
            config,
            stats: DispatcherStats::default(),
        }
    }

    /// Get dispatcher statistics.
    pub fn stats(&self) -> DispatcherStatsSnapshot {
        self.stats.snapshot()
    }

    /// Send one message to one recipient.
    ///
    /// Errors are pre-flight only: template resolution and the pending
    /// log write. Once the transport has been called, the outcome comes
    /// back inside the report with the log entry already updated.
    #[tracing::instrument(
        name = "dispatcher.send",
        skip(self, ctx),
        fields(recipient = %recipient.address, group = %group, kind = %kind)
    )]
    pub async fn send(
        &self,
        recipient: &Recipient,
        group: &str,
        kind: &str,
        ctx: &RenderContext,
        link_id: Option<&str>,
    ) -> Result<SendReport> {
        // Steps 1-3 are pre-flight: no log entry exists yet.
        let template = match self.preflight(async {
            self.resolver
                .resolve(group, kind)
                .await
                .map_err(DispatchError::from)
        })
        .await?
        {
            Some(template) => template,
            None => {
                self.record_preflight_failure();
                return Err(DispatchError::TemplateMissing {
                    group: group.to_string(),
                    kind: kind.to_string(),
                });
            }
        };

        let content = render(&template.body, ctx);
        let channel = ChannelClass::classify(&content);

        if channel != template.declared_class {
            tracing::debug!(
                template_id = %template.id,
                declared = %template.declared_class,
                classified = %channel,
                bytes = content.len(),
                "Classifier overrides template's declared channel"
            );
        }

        let log_id = self
            .preflight(async {
                self.log
                    .append(NewLogEntry {
                        link_id: link_id.map(str::to_string),
                        template_id: Some(template.id),
                        recipient: recipient.address.clone(),
                        recipient_name: recipient.name.clone(),
                        channel,
                        provider: self.transport.provider_name().to_string(),
                        content: content.clone(),
                        cost: channel.unit_cost(),
                    })
                    .await
                    .map_err(DispatchError::from)
            })
            .await?;

        let outcome = self.call_transport(channel, &recipient.address, &content).await;
        self.stats.total_attempts.fetch_add(1, Ordering::Relaxed);

        match outcome {
            Ok(receipt) => {
                self.log.mark_sent(log_id, &receipt.message_id).await?;
                self.stats.sent.fetch_add(1, Ordering::Relaxed);
                DispatchMetrics::record_sent(channel);

                tracing::info!(
                    log_id = %log_id,
                    provider_message_id = %receipt.message_id,
                    channel = %channel,
                    "Message sent"
                );

                Ok(SendReport {
                    success: true,
                    provider_message_id: Some(receipt.message_id),
                    error: None,
                    log_id,
                    channel,
                })
            }
            Err(e) => {
                let error = e.to_string();
                self.log.mark_failed(log_id, &error).await?;
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                DispatchMetrics::record_failed(channel);

                tracing::warn!(
                    log_id = %log_id,
                    channel = %channel,
                    error = %error,
                    "Transport rejected message"
                );

                Ok(SendReport {
                    success: false,
                    provider_message_id: None,
                    error: Some(error),
                    log_id,
                    channel,
                })
            }
        }
    }

    /// Re-send an earlier attempt using its stored content and channel.
    ///
    /// The content is deliberately *not* re-rendered: a retry delivers
    /// bytes identical to the first attempt even if templates changed in
    /// the meantime. The same entry is updated in place. Concurrent
    /// retries of one id are not guarded; the last writer wins.
    #[tracing::instrument(name = "dispatcher.retry", skip(self))]
    pub async fn retry(&self, log_id: Uuid) -> Result<RetryReport> {
        let entry = self
            .log
            .get(log_id)
            .await?
            .ok_or(DispatchError::LogEntryMissing(log_id))?;

        self.stats.retries.fetch_add(1, Ordering::Relaxed);
        self.stats.total_attempts.fetch_add(1, Ordering::Relaxed);
        DispatchMetrics::record_retry();

        let outcome = self
            .call_transport(entry.channel, &entry.recipient, &entry.content)
            .await;

        match outcome {
            Ok(receipt) => {
                self.log.mark_sent(log_id, &receipt.message_id).await?;
                self.stats.sent.fetch_add(1, Ordering::Relaxed);
                DispatchMetrics::record_sent(entry.channel);

                tracing::info!(
                    log_id = %log_id,
                    provider_message_id = %receipt.message_id,
                    "Retry succeeded"
                );

                Ok(RetryReport {
                    success: true,
                    provider_message_id: Some(receipt.message_id),
                    error: None,
                })
            }
            Err(e) => {
                let error = e.to_string();
                self.log.mark_failed(log_id, &error).await?;
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                DispatchMetrics::record_failed(entry.channel);

                tracing::warn!(log_id = %log_id, error = %error, "Retry failed");

                Ok(RetryReport {
                    success: false,
                    provider_message_id: None,
                    error: Some(error),
                })
            }
        }
    }

    async fn call_transport(
        &self,
        channel: ChannelClass,
        destination: &str,
        body: &str,
    ) -> std::result::Result<crate::transport::ProviderReceipt, crate::transport::TransportError>
    {
        match channel {
            ChannelClass::Short => self.transport.send_short(destination, body).await,
            ChannelClass::Long => {
                self.transport
                    .send_long(destination, body, &self.config.sender_label)
                    .await
            }
        }
    }

    /// Run a pre-flight step, counting its failure as such.
    async fn preflight<T>(
        &self,
        op: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        match op.await {
            Ok(value) => Ok(value),
            Err(e) => {
                self.record_preflight_failure();
                Err(e)
            }
        }
    }

    fn record_preflight_failure(&self) {
        self.stats.preflight_failures.fetch_add(1, Ordering::Relaxed);
        DispatchMetrics::record_preflight_failure();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_snapshot() {
        let stats = DispatcherStats::default();
        stats.total_attempts.fetch_add(4, Ordering::Relaxed);
        stats.sent.fetch_add(3, Ordering::Relaxed);
        stats.failed.fetch_add(1, Ordering::Relaxed);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_attempts, 4);
        assert_eq!(snapshot.sent, 3);
        assert_eq!(snapshot.failed, 1);
        assert_eq!(snapshot.retries, 0);
    }

    #[test]
    fn test_recipient_constructors() {
        let bare = Recipient::new("01012345678");
        assert!(bare.name.is_none());

        let named = Recipient::named("01012345678", "Kim");
        assert_eq!(named.name.as_deref(), Some("Kim"));
    }
}
