//! Delivery log storage abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::store::StoreError;

use super::types::{DeliveryLogEntry, NewLogEntry};

/// Append/update storage for delivery attempts.
///
/// Entries are always created `pending`; the outcome write is a
/// separate operation because the outcome is unknown at creation time.
/// Each operation is individually atomic; no multi-row transaction is
/// required.
#[async_trait]
pub trait DeliveryLog: Send + Sync {
    /// Create a `pending` entry and return its generated id.
    async fn append(&self, new: NewLogEntry) -> Result<Uuid, StoreError>;

    /// Transition an entry to `sent` with the provider-assigned id.
    async fn mark_sent(&self, id: Uuid, provider_message_id: &str) -> Result<(), StoreError>;

    /// Transition an entry to `failed`, preserving the error text.
    async fn mark_failed(&self, id: Uuid, error: &str) -> Result<(), StoreError>;

    /// Read one entry by id.
    async fn get(&self, id: Uuid) -> Result<Option<DeliveryLogEntry>, StoreError>;

    /// Most recent entries, newest first. Read by the admin surface for
    /// audit and resend screens.
    async fn list_recent(&self, limit: usize) -> Result<Vec<DeliveryLogEntry>, StoreError>;
}
