//! dewmon: live temperature / humidity monitor for a serial sensor.
//!
//! Run with:  `RUST_LOG=info dewmon` (window) or `dewmon --headless` (log only)

mod headless;

use anyhow::{Context, Result};
use dewmon_config::{default_path, load as load_config};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging. RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("dewmon v{} starting", env!("CARGO_PKG_VERSION"));

    let mut headless = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--headless" => headless = true,
            other => warn!("Ignoring unknown argument '{other}'"),
        }
    }

    let path = default_path();
    let config = load_config(&path)
        .with_context(|| format!("loading config from '{}'", path.display()))?;

    if headless {
        headless::run(config)
    } else {
        dewmon_ui::run(config).map_err(Into::into)
    }
}
