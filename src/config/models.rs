//! Configuration data structures for pokedex-cache.
//!
//! This module defines the schema for the application settings: fast-tier
//! limits, the durable store backend, and logging output.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Fast-tier and classification settings.
    #[serde(default)]
    pub cache: CacheSettings,

    /// Durable (session-scoped) store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the image cache and the custom-id classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Maximum number of entries held by the fast tier.
    /// Default: `100`
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Expiration applied by `cache_image` when the caller gives none.
    /// Default: `60`
    #[serde(default = "default_expiration_minutes")]
    pub default_expiration_minutes: u64,

    /// Numeric ids above this value are treated as custom.
    /// Default: `2000`
    #[serde(default = "default_custom_id_ceiling")]
    pub custom_id_ceiling: u64,
}

/// Which durable store backs the session tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON session file on disk.
    File,
    /// In-process map, lost when the process exits.
    Memory,
    /// No durable tier at all.
    None,
}

/// Settings for the durable store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend selection (`file`, `memory`, `none`).
    /// Default: `file`
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Path of the session file used by the `file` backend.
    /// Default: `<cache dir>/pokedex-cache/session.json`
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Maximum serialized size of the session file, `0` for unlimited.
    /// Default: `5242880` (5 MiB)
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            default_expiration_minutes: default_expiration_minutes(),
            custom_id_ceiling: default_custom_id_ceiling(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_storage_path(),
            quota_bytes: default_quota_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_max_entries() -> usize {
    crate::cache::MAX_CACHE_SIZE
}

fn default_expiration_minutes() -> u64 {
    crate::cache::DEFAULT_EXPIRATION_MINUTES
}

fn default_custom_id_ceiling() -> u64 {
    crate::registry::CANONICAL_ID_CEILING
}

fn default_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_storage_path() -> String {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pokedex-cache")
        .join("session.json")
        .to_string_lossy()
        .to_string()
}

fn default_quota_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cache_constants() {
        let config = AppConfig::default();
        assert_eq!(config.cache.max_entries, 100);
        assert_eq!(config.cache.default_expiration_minutes, 60);
        assert_eq!(config.cache.custom_id_ceiling, 2000);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.storage.path.ends_with("session.json"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [cache]
            max_entries = 10

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.cache.max_entries, 10);
        assert_eq!(config.cache.default_expiration_minutes, 60);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.level, "info");
    }
}
