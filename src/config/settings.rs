use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub database: Option<DatabaseConfig>,
}

/// Tunables for the send path and bulk fan-out.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Number of recipients dispatched concurrently per bulk batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Pause between bulk batches in milliseconds
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,
    /// Sender identification passed to the long-message channel
    #[serde(default = "default_sender_label")]
    pub sender_label: String,
    /// Group name used as the fallback tier during template resolution
    #[serde(default = "default_shared_group")]
    pub shared_group: String,
}

fn default_batch_size() -> usize {
    5
}

fn default_batch_pause_ms() -> u64 {
    1000
}

fn default_sender_label() -> String {
    "notifications".to_string()
}

fn default_shared_group() -> String {
    "shared".to_string()
}

/// Backend selection for the template store and delivery log.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// "memory" or "postgres"
    #[serde(default = "default_store_backend")]
    pub backend: String,
}

fn default_store_backend() -> String {
    "memory".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u32,
}

fn default_pool_size() -> u32 {
    5
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_idle_timeout() -> u32 {
    300
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("dispatch.batch_size", 5)?
            .set_default("dispatch.batch_pause_ms", 1000)?
            .set_default("store.backend", "memory")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // DISPATCH_BATCH_SIZE, STORE_BACKEND, DATABASE_URL, etc.
            .add_source(
                Environment::default()
                    .separator("_")
                    .try_parsing(true)
                    .list_separator(","),
            );

        builder.build()?.try_deserialize()
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_pause_ms: default_batch_pause_ms(),
            sender_label: default_sender_label(),
            shared_group: default_shared_group(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
        }
    }
}
