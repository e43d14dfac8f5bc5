//! Delivery log records and their three-state lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::channel::ChannelClass;

/// Lifecycle of a delivery attempt: `Pending` at creation, then exactly
/// one terminal update per transport call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Failed => "failed",
        }
    }
}

impl std::str::FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DeliveryStatus::Pending),
            "sent" => Ok(DeliveryStatus::Sent),
            "failed" => Ok(DeliveryStatus::Failed),
            other => Err(format!("Unknown delivery status: {}", other)),
        }
    }
}

/// Fields known before the transport call. Deliberately carries no
/// status or outcome: a log entry in a terminal state at creation time
/// is unrepresentable through this type.
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    /// Originating business record, e.g. a booking id
    pub link_id: Option<String>,
    /// Template the content was rendered from
    pub template_id: Option<Uuid>,
    /// Destination address (phone number or email)
    pub recipient: String,
    /// Recipient display name, when known
    pub recipient_name: Option<String>,
    /// Channel class actually used, per classification
    pub channel: ChannelClass,
    /// Transport provider name
    pub provider: String,
    /// Fully rendered message body, stored for audit and resend
    pub content: String,
    /// Nominal unit cost for the channel used
    pub cost: f64,
}

/// One durable record per send attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryLogEntry {
    pub id: Uuid,
    pub link_id: Option<String>,
    pub template_id: Option<Uuid>,
    pub recipient: String,
    pub recipient_name: Option<String>,
    pub channel: ChannelClass,
    pub provider: String,
    pub content: String,
    pub cost: f64,
    pub status: DeliveryStatus,
    /// Provider-assigned identifier, set when the transport accepts
    pub provider_message_id: Option<String>,
    /// Error text from the transport, set on failure
    pub error: Option<String>,
    /// When the transport accepted the message
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl DeliveryLogEntry {
    /// Materialize a fresh `pending` entry from its creation fields.
    pub(crate) fn pending(id: Uuid, new: NewLogEntry) -> Self {
        Self {
            id,
            link_id: new.link_id,
            template_id: new.template_id,
            recipient: new.recipient,
            recipient_name: new.recipient_name,
            channel: new.channel,
            provider: new.provider,
            content: new.content,
            cost: new.cost,
            status: DeliveryStatus::Pending,
            provider_message_id: None,
            error: None,
            sent_at: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_starts_pending() {
        let entry = DeliveryLogEntry::pending(
            Uuid::new_v4(),
            NewLogEntry {
                link_id: Some("booking-7".to_string()),
                template_id: None,
                recipient: "01012345678".to_string(),
                recipient_name: None,
                channel: ChannelClass::Short,
                provider: "test".to_string(),
                content: "hello".to_string(),
                cost: ChannelClass::Short.unit_cost(),
            },
        );

        assert_eq!(entry.status, DeliveryStatus::Pending);
        assert!(entry.provider_message_id.is_none());
        assert!(entry.error.is_none());
        assert!(entry.sent_at.is_none());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            DeliveryStatus::Pending,
            DeliveryStatus::Sent,
            DeliveryStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<DeliveryStatus>().unwrap(), status);
        }
    }
}
