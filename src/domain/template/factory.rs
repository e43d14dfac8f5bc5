//! Template store factory.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StoreConfig;

use super::memory_store::MemoryTemplateStore;
use super::postgres_store::PostgresTemplateStore;
use super::store::TemplateStore;

/// Create a template store based on configuration.
///
/// `"postgres"` requires a pool; anything else (and a missing pool)
/// falls back to the in-memory store.
pub fn create_template_store(
    settings: &StoreConfig,
    pool: Option<PgPool>,
) -> Arc<dyn TemplateStore> {
    match (settings.backend.as_str(), pool) {
        ("postgres", Some(pool)) => {
            tracing::info!(backend = "postgres", "Creating PostgreSQL template store");
            Arc::new(PostgresTemplateStore::new(pool))
        }
        ("postgres", None) => {
            tracing::warn!(
                "Postgres template store requested but no pool provided, using memory store"
            );
            Arc::new(MemoryTemplateStore::new())
        }
        _ => {
            tracing::info!(backend = "memory", "Creating in-memory template store");
            Arc::new(MemoryTemplateStore::new())
        }
    }
}
