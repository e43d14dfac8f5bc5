//! In-memory delivery log backed by DashMap.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::store::StoreError;

use super::store::DeliveryLog;
use super::types::{DeliveryLogEntry, DeliveryStatus, NewLogEntry};

pub struct MemoryDeliveryLog {
    entries: DashMap<Uuid, DeliveryLogEntry>,
}

impl Default for MemoryDeliveryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDeliveryLog {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

#[async_trait]
impl DeliveryLog for MemoryDeliveryLog {
    async fn append(&self, new: NewLogEntry) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.entries.insert(id, DeliveryLogEntry::pending(id, new));
        Ok(id)
    }

    async fn mark_sent(&self, id: Uuid, provider_message_id: &str) -> Result<(), StoreError> {
        let mut entry = self.entries.get_mut(&id).ok_or(StoreError::RowMissing(id))?;
        entry.status = DeliveryStatus::Sent;
        entry.provider_message_id = Some(provider_message_id.to_string());
        entry.error = None;
        entry.sent_at = Some(Utc::now());
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, error: &str) -> Result<(), StoreError> {
        let mut entry = self.entries.get_mut(&id).ok_or(StoreError::RowMissing(id))?;
        entry.status = DeliveryStatus::Failed;
        entry.error = Some(error.to_string());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<DeliveryLogEntry>, StoreError> {
        Ok(self.entries.get(&id).map(|e| e.clone()))
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<DeliveryLogEntry>, StoreError> {
        let mut all: Vec<DeliveryLogEntry> =
            self.entries.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::channel::ChannelClass;

    fn new_entry(recipient: &str) -> NewLogEntry {
        NewLogEntry {
            link_id: None,
            template_id: None,
            recipient: recipient.to_string(),
            recipient_name: None,
            channel: ChannelClass::Short,
            provider: "test".to_string(),
            content: "hello".to_string(),
            cost: ChannelClass::Short.unit_cost(),
        }
    }

    #[tokio::test]
    async fn test_append_creates_pending() {
        let log = MemoryDeliveryLog::new();
        let id = log.append(new_entry("01011112222")).await.unwrap();

        let entry = log.get(id).await.unwrap().unwrap();
        assert_eq!(entry.status, DeliveryStatus::Pending);
        assert_eq!(entry.recipient, "01011112222");
    }

    #[tokio::test]
    async fn test_mark_sent_sets_provider_id_and_timestamp() {
        let log = MemoryDeliveryLog::new();
        let id = log.append(new_entry("01011112222")).await.unwrap();

        log.mark_sent(id, "prov-42").await.unwrap();

        let entry = log.get(id).await.unwrap().unwrap();
        assert_eq!(entry.status, DeliveryStatus::Sent);
        assert_eq!(entry.provider_message_id.as_deref(), Some("prov-42"));
        assert!(entry.sent_at.is_some());
        assert!(entry.error.is_none());
    }

    #[tokio::test]
    async fn test_mark_failed_preserves_error() {
        let log = MemoryDeliveryLog::new();
        let id = log.append(new_entry("01011112222")).await.unwrap();

        log.mark_failed(id, "gateway timeout").await.unwrap();

        let entry = log.get(id).await.unwrap().unwrap();
        assert_eq!(entry.status, DeliveryStatus::Failed);
        assert_eq!(entry.error.as_deref(), Some("gateway timeout"));
    }

    #[tokio::test]
    async fn test_failed_then_sent_clears_error() {
        // Retry path: a failed entry updated in place after a successful resend
        let log = MemoryDeliveryLog::new();
        let id = log.append(new_entry("01011112222")).await.unwrap();

        log.mark_failed(id, "first attempt").await.unwrap();
        log.mark_sent(id, "prov-7").await.unwrap();

        let entry = log.get(id).await.unwrap().unwrap();
        assert_eq!(entry.status, DeliveryStatus::Sent);
        assert!(entry.error.is_none());
        assert_eq!(log.count(), 1);
    }

    #[tokio::test]
    async fn test_mark_on_missing_row() {
        let log = MemoryDeliveryLog::new();
        let missing = Uuid::new_v4();
        assert!(matches!(
            log.mark_sent(missing, "x").await,
            Err(StoreError::RowMissing(_))
        ));
    }

    #[tokio::test]
    async fn test_list_recent_orders_newest_first() {
        let log = MemoryDeliveryLog::new();
        for i in 0..5 {
            log.append(new_entry(&format!("0101111{:04}", i))).await.unwrap();
        }

        let recent = log.list_recent(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert!(recent[0].created_at >= recent[1].created_at);
        assert!(recent[1].created_at >= recent[2].created_at);
    }
}
