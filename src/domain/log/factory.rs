//! Delivery log factory.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StoreConfig;

use super::memory_store::MemoryDeliveryLog;
use super::postgres_store::PostgresDeliveryLog;
use super::store::DeliveryLog;

/// Create a delivery log based on configuration.
///
/// `"postgres"` requires a pool; anything else (and a missing pool)
/// falls back to the in-memory log.
pub fn create_delivery_log(settings: &StoreConfig, pool: Option<PgPool>) -> Arc<dyn DeliveryLog> {
    match (settings.backend.as_str(), pool) {
        ("postgres", Some(pool)) => {
            tracing::info!(backend = "postgres", "Creating PostgreSQL delivery log");
            Arc::new(PostgresDeliveryLog::new(pool))
        }
        ("postgres", None) => {
            tracing::warn!("Postgres delivery log requested but no pool provided, using memory log");
            Arc::new(MemoryDeliveryLog::new())
        }
        _ => {
            tracing::info!(backend = "memory", "Creating in-memory delivery log");
            Arc::new(MemoryDeliveryLog::new())
        }
    }
}
