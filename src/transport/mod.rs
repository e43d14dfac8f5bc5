//! Transport abstraction over the external message gateways.
//!
//! The core treats transports as opaque: a call either yields a
//! provider receipt or an error. Network-level retries, timeouts, and
//! cancellation are the transport client's own concern.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a transport call can produce.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Provider rejected the message: {0}")]
    Rejected(String),

    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Identifier handed back by the provider for an accepted message.
#[derive(Debug, Clone)]
pub struct ProviderReceipt {
    pub message_id: String,
}

/// A two-mode outbound channel: short messages by destination and body,
/// long messages additionally carrying a sender label.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Provider name recorded on delivery log entries.
    fn provider_name(&self) -> &str;

    async fn send_short(
        &self,
        destination: &str,
        body: &str,
    ) -> Result<ProviderReceipt, TransportError>;

    async fn send_long(
        &self,
        destination: &str,
        body: &str,
        sender_label: &str,
    ) -> Result<ProviderReceipt, TransportError>;
}
