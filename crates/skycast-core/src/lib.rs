//! Shared foundations for the skycast widget: configuration, the error
//! taxonomy, date-range validation, and the logging bootstrap.

pub mod config;
pub mod dates;
pub mod error;

pub use config::{Config, ValidationResult};
pub use dates::DateRange;
pub use error::{AppError, ValidationError};

use anyhow::Result;

/// Initialize logging for the widget process.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("skycast core initialized");
    Ok(())
}
