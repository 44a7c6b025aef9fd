// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{CacheError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_path())
    }

    /// Same layering as [`AppConfig::load`] with an explicit config file path.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(path).required(false))
            // Override with environment variables (prefix: POKEDEX_CACHE__)
            .add_source(
                Environment::with_prefix("POKEDEX_CACHE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| CacheError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CacheError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pokedex-cache")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
