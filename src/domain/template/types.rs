//! Template record definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::channel::ChannelClass;

/// A message template, owned and edited by the content-management
/// surface. The dispatch core only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Unique template identifier
    pub id: Uuid,

    /// Recipient group this variant belongs to, or the shared group
    pub group: String,

    /// Business message kind, e.g. "confirmed" or "payment-pending"
    pub kind: String,

    /// Body text with {{variable}} placeholders
    pub body: String,

    /// The author's channel intent. A hint only; classification of the
    /// rendered body decides the channel actually used.
    pub declared_class: ChannelClass,

    /// Inactive templates are invisible to resolution
    pub active: bool,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Construct an active template with fresh timestamps.
    pub fn new(group: impl Into<String>, kind: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Utc::now();
        let body = body.into();
        Self {
            id: Uuid::new_v4(),
            group: group.into(),
            kind: kind.into(),
            declared_class: ChannelClass::classify(&body),
            body,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style toggle, mainly for seeding stores in tests.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}
