//! Durable (session-scoped) key-value stores.
//!
//! The image cache mirrors its entries into a flat string-keyed store that
//! outlives a single cache instance but not the user's session. Backends:
//!
//! - [`NoopStore`]: no persistence, every call is a no-op.
//! - [`MemoryStore`]: in-process session map, shareable between instances.
//! - [`FileStore`]: JSON session file on disk with an optional size quota.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// Flat string-keyed durable store.
///
/// Values are opaque strings; callers serialize to JSON themselves.
pub trait DurableStore: Send + Sync + fmt::Debug {
    /// Whether this store actually persists anything. The cache skips
    /// hydration and mirroring entirely when this is `false`.
    fn is_available(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Every key currently present, in no particular order.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Store used when no durable tier exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

impl DurableStore for NoopStore {
    fn is_available(&self) -> bool {
        false
    }

    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Build the store selected by configuration.
pub fn from_config(config: &StorageConfig) -> Arc<dyn DurableStore> {
    match config.backend {
        StorageBackend::File => {
            let quota = (config.quota_bytes > 0).then_some(config.quota_bytes);
            Arc::new(FileStore::new(&config.path).with_quota(quota))
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::None => Arc::new(NoopStore),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_store_is_unavailable_and_empty() {
        let store = NoopStore;
        assert!(!store.is_available());
        store.set("pokemon_img_pikachu", "{}").unwrap();
        assert_eq!(store.get("pokemon_img_pikachu").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_from_config_selects_backend() {
        let mut config = StorageConfig {
            backend: StorageBackend::None,
            ..StorageConfig::default()
        };
        assert!(!from_config(&config).is_available());

        config.backend = StorageBackend::Memory;
        assert!(from_config(&config).is_available());
    }
}
