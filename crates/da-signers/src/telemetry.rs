//! Tracing subscriber setup.

use crate::config::DaSignersConfig;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Telemetry initialisation failure.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Filter or subscriber could not be installed.
    #[error("Failed to initialize tracing: {0}")]
    TracerInit(String),
}

/// Install a global `tracing` subscriber for the module.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &DaSignersConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::TracerInit(e.to_string()))?;

    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
            .map_err(|e| TelemetryError::TracerInit(e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
            .map_err(|e| TelemetryError::TracerInit(e.to_string()))?;
    }

    tracing::info!(
        log_level = %config.log_level,
        json = config.json_logs,
        "[da-signers] tracing initialized"
    );
    Ok(())
}
