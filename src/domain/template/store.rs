//! Template store abstraction and group-fallback resolution.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::store::StoreError;

use super::types::Template;

/// Read-side access to active templates.
///
/// The content-management surface owns writes; the dispatch core only
/// queries. Implementations must return at most one template per
/// (group, kind), preferring the most recently updated record when the
/// uniqueness invariant has been violated upstream.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Find the active template matching (group, kind) exactly.
    async fn find_active(&self, group: &str, kind: &str) -> Result<Option<Template>, StoreError>;
}

/// Resolves a (group, kind) pair with fallback to the shared group.
///
/// The fallback order is data, not control flow: [`lookup_keys`] builds
/// the ordered key list and [`resolve`] tries it in sequence.
///
/// [`lookup_keys`]: TemplateResolver::lookup_keys
/// [`resolve`]: TemplateResolver::resolve
pub struct TemplateResolver {
    store: Arc<dyn TemplateStore>,
    shared_group: String,
}

impl TemplateResolver {
    pub fn new(store: Arc<dyn TemplateStore>, shared_group: impl Into<String>) -> Self {
        Self {
            store,
            shared_group: shared_group.into(),
        }
    }

    /// Ordered list of (group, kind) keys to try.
    pub fn lookup_keys(&self, group: &str, kind: &str) -> Vec<(String, String)> {
        let mut keys = vec![(group.to_string(), kind.to_string())];
        if group != self.shared_group {
            keys.push((self.shared_group.clone(), kind.to_string()));
        }
        keys
    }

    /// Resolve a template, falling back from the group-specific variant
    /// to the shared one. `None` is a signal for the caller to abort the
    /// send, not an error.
    pub async fn resolve(&self, group: &str, kind: &str) -> Result<Option<Template>, StoreError> {
        for (lookup_group, lookup_kind) in self.lookup_keys(group, kind) {
            if let Some(template) = self.store.find_active(&lookup_group, &lookup_kind).await? {
                tracing::debug!(
                    group = %group,
                    kind = %kind,
                    resolved_group = %template.group,
                    template_id = %template.id,
                    "Template resolved"
                );
                return Ok(Some(template));
            }
        }

        tracing::debug!(group = %group, kind = %kind, "No active template found");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::MemoryTemplateStore;

    #[test]
    fn test_lookup_keys_include_shared_fallback() {
        let store = Arc::new(MemoryTemplateStore::new());
        let resolver = TemplateResolver::new(store, "shared");

        let keys = resolver.lookup_keys("gangnam", "confirmed");
        assert_eq!(
            keys,
            vec![
                ("gangnam".to_string(), "confirmed".to_string()),
                ("shared".to_string(), "confirmed".to_string()),
            ]
        );
    }

    #[test]
    fn test_lookup_keys_for_shared_group_itself() {
        let store = Arc::new(MemoryTemplateStore::new());
        let resolver = TemplateResolver::new(store, "shared");

        let keys = resolver.lookup_keys("shared", "confirmed");
        assert_eq!(keys, vec![("shared".to_string(), "confirmed".to_string())]);
    }

    #[tokio::test]
    async fn test_resolve_prefers_group_specific() {
        let store = Arc::new(MemoryTemplateStore::new());
        store.upsert(Template::new("gangnam", "confirmed", "group body"));
        store.upsert(Template::new("shared", "confirmed", "shared body"));

        let resolver = TemplateResolver::new(store, "shared");
        let resolved = resolver.resolve("gangnam", "confirmed").await.unwrap().unwrap();
        assert_eq!(resolved.body, "group body");
    }

    #[tokio::test]
    async fn test_resolve_falls_back_when_group_inactive() {
        let store = Arc::new(MemoryTemplateStore::new());
        store.upsert(Template::new("gangnam", "confirmed", "group body").inactive());
        store.upsert(Template::new("shared", "confirmed", "shared body"));

        let resolver = TemplateResolver::new(store, "shared");
        let resolved = resolver.resolve("gangnam", "confirmed").await.unwrap().unwrap();
        assert_eq!(resolved.body, "shared body");
    }

    #[tokio::test]
    async fn test_resolve_none_when_nothing_matches() {
        let store = Arc::new(MemoryTemplateStore::new());
        let resolver = TemplateResolver::new(store, "shared");

        let resolved = resolver.resolve("gangnam", "archived").await.unwrap();
        assert!(resolved.is_none());
    }
}
