//! Delivery log.
//!
//! One durable entry per send attempt, created `pending` before the
//! transport call and updated to `sent` or `failed` after it. The entry
//! stores the rendered content itself so audits and retries do not
//! depend on the template surviving unchanged.

mod factory;
mod memory_store;
mod postgres_store;
mod store;
mod types;

pub use factory::create_delivery_log;
pub use memory_store::MemoryDeliveryLog;
pub use postgres_store::PostgresDeliveryLog;
pub use store::DeliveryLog;
pub use types::{DeliveryLogEntry, DeliveryStatus, NewLogEntry};

pub use crate::domain::store::StoreError;
