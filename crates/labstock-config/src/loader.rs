//! Configuration loading and path resolution.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::InventoryConfig;
use crate::error::{ConfigError, Result};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "LABSTOCK_CONFIG";

/// Built-in configuration document.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../data/default.toml");

const EMBEDDED_ORIGIN: &str = "<embedded default>";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given explicitly by the caller.
    Explicit(PathBuf),
    /// Path taken from [`CONFIG_ENV_VAR`].
    Environment(PathBuf),
    /// The embedded default document.
    Embedded,
}

/// Resolves which configuration to load.
///
/// Resolution order:
/// 1. `explicit` path
/// 2. `LABSTOCK_CONFIG` environment variable
/// 3. embedded default
pub fn resolve_config_source(explicit: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => ConfigSource::Environment(PathBuf::from(value)),
        _ => ConfigSource::Embedded,
    }
}

/// Loads and validates the effective configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<InventoryConfig> {
    let source = resolve_config_source(explicit);
    let config = match &source {
        ConfigSource::Explicit(path) | ConfigSource::Environment(path) => load_config_file(path)?,
        ConfigSource::Embedded => default_config()?,
    };
    info!(
        source = ?source,
        calibrator_keys = config.groups.calibrator.len(),
        qc_keys = config.groups.qc.len(),
        excluded_types = config.exclusions.types.len(),
        "configuration loaded"
    );
    Ok(config)
}

/// Loads a configuration file from disk.
pub fn load_config_file(path: &Path) -> Result<InventoryConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    debug!(path = %path.display(), bytes = text.len(), "read config file");
    parse_config(&text, path)
}

/// Parses the embedded default document.
pub fn default_config() -> Result<InventoryConfig> {
    parse_config(DEFAULT_CONFIG_TOML, Path::new(EMBEDDED_ORIGIN))
}

/// Parses and validates a configuration document. `origin` is used in errors.
pub fn parse_config(text: &str, origin: &Path) -> Result<InventoryConfig> {
    let config: InventoryConfig = toml::from_str(text).map_err(|source| ConfigError::Toml {
        path: origin.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Renders a configuration back to TOML.
pub fn render_config(config: &InventoryConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
