pub mod schema;

pub use schema::{DewConfig, DisplayConfig, SamplingConfig, SerialConfig, ThemeConfig};

use dewmon_core::{DewError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `DewConfig::default()` if
/// the file doesn't exist so the monitor always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<DewConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(DewConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| DewError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<DewConfig> {
    let config: DewConfig =
        toml::from_str(raw).map_err(|e| DewError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Return the config path: `$DEWMON_CONFIG` if set, otherwise the XDG
/// location (`$XDG_CONFIG_HOME/dewmon/dewmon.toml`).
pub fn default_path() -> PathBuf {
    if let Ok(explicit) = std::env::var("DEWMON_CONFIG") {
        return PathBuf::from(explicit);
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("dewmon").join("dewmon.toml")
}
