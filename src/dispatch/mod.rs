//! Dispatch orchestration: single sends, retries, status-driven kind
//! selection, and batched bulk fan-out.

mod bulk;
mod dispatcher;
mod events;

pub use bulk::{BulkController, BulkReport, RecipientOutcome};
pub use dispatcher::{
    Dispatcher, DispatcherStats, DispatcherStatsSnapshot, Recipient, RetryReport, SendReport,
};
pub use events::StatusKindMap;
