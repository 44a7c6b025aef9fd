// Error types for pokedex-cache
// Author: kelexine (https://github.com/kelexine)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Durable store error: {0}")]
    Storage(String),

    #[error("Durable store quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl CacheError {
    /// Short label used as the `kind` of `durable_store_errors_total`.
    pub fn kind(&self) -> &'static str {
        match self {
            CacheError::Storage(_) => "storage",
            CacheError::QuotaExceeded(_) => "quota_exceeded",
            CacheError::Config(_) | CacheError::ConfigParsing(_) => "config",
            CacheError::Io(_) => "io",
            CacheError::Json(_) => "json",
        }
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
