//! Tracing setup for hosts embedding the dispatch core.
//!
//! The embedding application calls [`init_telemetry`] once at startup.
//! Log level is controlled through `RUST_LOG`; defaults to `info`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Set `json_output` for machine-readable logs in production.
pub fn init_telemetry(json_output: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Tracing initialized");
}
