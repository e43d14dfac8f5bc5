//! In-memory template store backed by DashMap.
//!
//! Intended for tests and single-process deployments; templates are
//! lost on restart.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::store::StoreError;

use super::store::TemplateStore;
use super::types::Template;

pub struct MemoryTemplateStore {
    templates: DashMap<Uuid, Template>,
}

impl Default for MemoryTemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self {
            templates: DashMap::new(),
        }
    }

    /// Insert or replace a template by id.
    pub fn upsert(&self, template: Template) {
        self.templates.insert(template.id, template);
    }

    pub fn remove(&self, id: Uuid) -> Option<Template> {
        self.templates.remove(&id).map(|(_, t)| t)
    }

    pub fn count(&self) -> usize {
        self.templates.len()
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn find_active(&self, group: &str, kind: &str) -> Result<Option<Template>, StoreError> {
        let best = self
            .templates
            .iter()
            .filter(|entry| {
                let t = entry.value();
                t.active && t.group == group && t.kind == kind
            })
            .map(|entry| entry.value().clone())
            // Duplicate active templates should not occur; prefer the
            // most recently updated if they do.
            .max_by_key(|t| t.updated_at);

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_find_active_ignores_inactive() {
        let store = MemoryTemplateStore::new();
        store.upsert(Template::new("gangnam", "confirmed", "body").inactive());

        let found = store.find_active("gangnam", "confirmed").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_active_exact_match_only() {
        let store = MemoryTemplateStore::new();
        store.upsert(Template::new("gangnam", "confirmed", "body"));

        assert!(store.find_active("gangnam", "cancelled").await.unwrap().is_none());
        assert!(store.find_active("seocho", "confirmed").await.unwrap().is_none());
        assert!(store.find_active("gangnam", "confirmed").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_actives_prefer_most_recent() {
        let store = MemoryTemplateStore::new();

        let older = Template::new("shared", "reminder", "old body");
        let mut newer = Template::new("shared", "reminder", "new body");
        newer.updated_at = older.updated_at + Duration::seconds(10);

        store.upsert(older);
        store.upsert(newer);

        let found = store.find_active("shared", "reminder").await.unwrap().unwrap();
        assert_eq!(found.body, "new body");
    }

    #[tokio::test]
    async fn test_upsert_replaces() {
        let store = MemoryTemplateStore::new();
        let mut template = Template::new("shared", "thank-you", "v1");
        store.upsert(template.clone());

        template.body = "v2".to_string();
        store.upsert(template);

        assert_eq!(store.count(), 1);
        let found = store.find_active("shared", "thank-you").await.unwrap().unwrap();
        assert_eq!(found.body, "v2");
    }
}
