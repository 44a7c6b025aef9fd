// File-backed session store
// Author: kelexine (https://github.com/kelexine)
//
// The whole session is a single JSON object of string keys to string values,
// rewritten on every mutation. Deleting the file ends the session.

use super::DurableStore;
use crate::error::{CacheError, Result};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

type Items = BTreeMap<String, String>;

/// Durable store persisted as a JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Maximum serialized size in bytes, `None` for unlimited.
    quota_bytes: Option<usize>,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            quota_bytes: None,
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the session file. A missing file is an empty session.
    fn load(&self) -> Result<Items> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Items::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Items::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Like [`FileStore::load`], but a corrupt file starts a fresh session
    /// so writes are not blocked forever.
    fn load_for_write(&self) -> Result<Items> {
        match self.load() {
            Ok(items) => Ok(items),
            Err(CacheError::Json(e)) => {
                warn!(
                    "Session file {} is corrupt, starting fresh: {}",
                    self.path.display(),
                    e
                );
                Ok(Items::new())
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, items: &Items) -> Result<()> {
        let content = serde_json::to_string(items)?;

        if let Some(quota) = self.quota_bytes {
            if content.len() > quota {
                return Err(CacheError::QuotaExceeded(format!(
                    "session would be {} bytes, quota is {}",
                    content.len(),
                    quota
                )));
            }
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, content)?;
        debug!("Saved session file with {} keys", items.len());
        Ok(())
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut items = self.load_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut items = self.load_for_write()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }
}
