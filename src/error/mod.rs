use thiserror::Error;

use crate::domain::store::StoreError;

/// Errors surfaced by the dispatch core.
///
/// Everything here is a pre-flight condition: the request never reached
/// the transport, and no delivery log entry was written for it.
/// Transport failures are *not* errors at this level; they come back
/// inside a `SendReport` with the log entry already marked `failed`.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No active template for group '{group}', kind '{kind}' (shared fallback included)")]
    TemplateMissing { group: String, kind: String },

    #[error("Delivery log entry not found: {0}")]
    LogEntryMissing(uuid::Uuid),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
