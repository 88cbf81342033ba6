//! Operator-maintained configuration for the inventory engine.
//!
//! Column candidate lists, component keywords, calibrator/QC group maps and
//! the excluded-types set are data, not logic. They are loaded once from
//! TOML and never mutated afterwards.

mod config;
mod error;
mod loader;

pub use config::{
    ColumnCandidates, ComponentKeywords, Exclusions, ExpiryPolicy, GroupMaps, InventoryConfig,
    PooledRecords,
};
pub use error::{ConfigError, Result};
pub use loader::{
    CONFIG_ENV_VAR, ConfigSource, DEFAULT_CONFIG_TOML, default_config, load_config,
    load_config_file, parse_config, render_config, resolve_config_source,
};
