// Infrastructure layer (shared components)
pub mod config;
pub mod error;
pub mod metrics;
pub mod postgres;
pub mod telemetry;

// Domain layer (business logic)
pub mod domain;

// Dispatch layer
pub mod dispatch;
pub mod transport;

pub use dispatch::{BulkController, Dispatcher, StatusKindMap};
pub use domain::channel::ChannelClass;
pub use error::{DispatchError, Result};
