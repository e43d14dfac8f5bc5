mod settings;

pub use settings::{DatabaseConfig, DispatchConfig, Settings, StoreConfig};
