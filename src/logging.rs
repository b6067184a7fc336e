use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow!("Invalid log filter '{}': {}", level, e))?;

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
            .map_err(|e| anyhow!("Failed to install logger: {}", e))?;
    } else {
        registry
            .with(fmt::layer().with_target(false))
            .try_init()
            .map_err(|e| anyhow!("Failed to install logger: {}", e))?;
    }

    Ok(())
}
