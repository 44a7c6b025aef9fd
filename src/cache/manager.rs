//! The image cache and custom registry service.
//!
//! [`PokemonCache`] owns the fast tier and the custom-name set behind one
//! mutex, and mirrors both into an injected [`DurableStore`]. The fast tier
//! is authoritative; durable writes are best-effort and their failures are
//! logged and counted, never returned.

// Author: kelexine (https://github.com/kelexine)

use crate::cache::global;
use crate::cache::image::{ImageCache, Lookup};
use crate::cache::key::{image_key, is_owned_key, normalize_key};
use crate::cache::models::{CacheEntry, CacheStats, Expiration};
use crate::config::{AppConfig, CacheSettings};
use crate::error::CacheError;
use crate::metrics;
use crate::models::PokemonRecord;
use crate::registry::{self, CustomRegistry};
use crate::storage::{self, DurableStore, NoopStore};
use crate::utils::time::{Clock, SystemClock};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// State guarded by the service mutex.
#[derive(Debug)]
struct CacheState {
    images: ImageCache,
    custom: CustomRegistry,
    stats: CacheStats,
}

/// Two-tier image URL cache plus custom entity registry.
///
/// Construct one per process, call [`PokemonCache::init`], and hand it to
/// collaborators by reference or `Arc`.
#[derive(Debug)]
pub struct PokemonCache {
    settings: CacheSettings,
    store: Arc<dyn DurableStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<CacheState>,
}

impl PokemonCache {
    /// Create a cache over the given durable store.
    pub fn new(settings: CacheSettings, store: Arc<dyn DurableStore>) -> Self {
        let images = ImageCache::new(settings.max_entries);
        Self {
            settings,
            store,
            clock: Arc::new(SystemClock),
            state: Mutex::new(CacheState {
                images,
                custom: CustomRegistry::new(),
                stats: CacheStats::default(),
            }),
        }
    }

    /// Fast tier only, default settings.
    pub fn in_memory_only() -> Self {
        Self::new(CacheSettings::default(), Arc::new(NoopStore))
    }

    /// Build from application configuration, selecting the configured store.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.cache.clone(), storage::from_config(&config.storage))
    }

    /// Replace the clock used for expiry.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Hydrate the registry from the durable tier, if any.
    ///
    /// Safe to call repeatedly; each call re-merges the current snapshot.
    pub fn init(&self) -> &Self {
        if self.store.is_available() {
            self.load_stored_custom_pokemon();
        } else {
            debug!("No durable store available, running fast tier only");
        }
        self
    }

    /// Merge the durable custom-name snapshot into the registry.
    ///
    /// Returns the number of names that were not already registered.
    pub fn load_stored_custom_pokemon(&self) -> usize {
        let names = registry::load_snapshot(self.store.as_ref());
        let mut state = self.state.lock();
        let added = state.custom.merge(&names);
        if added > 0 {
            info!("Loaded {} stored custom Pokémon", added);
        }
        added
    }

    // ========================================================================
    // Custom entity registry
    // ========================================================================

    /// Whether an identifier falls outside the canonical dataset.
    pub fn is_custom_id<I: fmt::Display + ?Sized>(&self, id: &I) -> bool {
        registry::is_custom_id_with_ceiling(id, self.settings.custom_id_ceiling)
    }

    /// Mark a name as custom. Empty names are ignored.
    pub fn register_custom<N: fmt::Display + ?Sized>(&self, name: &N) {
        let normalized = normalize_key(name);
        if normalized.is_empty() {
            return;
        }

        let mut state = self.state.lock();
        if !state.custom.insert(normalized.clone()) {
            return;
        }

        info!("Registered custom Pokémon: {}", normalized);
        metrics::record_custom_registration();

        if self.store.is_available() {
            if let Err(e) = registry::append_to_snapshot(self.store.as_ref(), &normalized) {
                warn!("Failed to persist custom Pokémon {}: {}", normalized, e);
                metrics::record_durable_error("write", &e);
            }
        }
    }

    pub fn is_custom_name<N: fmt::Display + ?Sized>(&self, name: &N) -> bool {
        let normalized = normalize_key(name);
        if normalized.is_empty() {
            return false;
        }
        self.state.lock().custom.contains(&normalized)
    }

    /// Custom if either the id is outside the canonical range or the name
    /// has been registered.
    pub fn is_custom(&self, id: Option<&str>, name: &str) -> bool {
        id.map_or(false, |id| self.is_custom_id(id)) || self.is_custom_name(name)
    }

    /// Sorted list of registered custom names.
    pub fn custom_names(&self) -> Vec<String> {
        self.state.lock().custom.names()
    }

    // ========================================================================
    // Image resolution cache
    // ========================================================================

    /// Look up a cached image URL, fast tier first, then the durable tier.
    pub fn get_image_from_cache<K: fmt::Display + ?Sized>(&self, key: &K) -> Option<String> {
        let normalized = normalize_key(key);
        if normalized.is_empty() {
            return None;
        }

        let now = self.clock.now_millis();
        let mut state = self.state.lock();

        match state.images.lookup(&normalized, now) {
            Lookup::Hit(url) => {
                debug!("Image cache hit: {}", normalized);
                state.stats.hits += 1;
                metrics::record_cache_hit();
                return Some(url);
            }
            Lookup::Expired => {
                debug!("Image cache entry expired: {}", normalized);
                state.stats.expirations += 1;
                metrics::record_cache_expired();
                self.publish_entries(state.images.len());
            }
            Lookup::Miss => {}
        }

        if self.store.is_available() {
            if let Some(entry) = self.read_durable(&normalized, now) {
                debug!("Promoted durable image entry: {}", normalized);
                let url = entry.url.clone();
                self.insert_fast(&mut state, normalized, entry);
                state.stats.durable_hits += 1;
                metrics::record_durable_hit();
                return Some(url);
            }
        }

        debug!("Image cache miss: {}", normalized);
        state.stats.misses += 1;
        metrics::record_cache_miss();
        None
    }

    /// Cache an image URL with the configured default expiration.
    pub fn cache_image<K: fmt::Display + ?Sized>(&self, key: &K, url: &str) {
        let expiration = Expiration::Minutes(self.settings.default_expiration_minutes);
        self.cache_image_with_expiration(key, url, expiration);
    }

    /// Cache an image URL. Empty keys or URLs are ignored.
    pub fn cache_image_with_expiration<K: fmt::Display + ?Sized>(
        &self,
        key: &K,
        url: &str,
        expiration: Expiration,
    ) {
        let normalized = normalize_key(key);
        if normalized.is_empty() || url.is_empty() {
            return;
        }

        let entry = CacheEntry::new(url, expiration.expires_at(self.clock.now_millis()));
        let mut state = self.state.lock();

        self.insert_fast(&mut state, normalized.clone(), entry.clone());
        metrics::record_cache_store();

        if self.store.is_available() {
            self.write_durable(&normalized, &entry);
        }
    }

    /// Look up `key`, or resolve it with `resolver` and cache the result.
    ///
    /// The lock is not held while the resolver runs.
    pub fn resolve_image<K, F>(&self, key: &K, resolver: F) -> Option<String>
    where
        K: fmt::Display + ?Sized,
        F: FnOnce(&str) -> Option<String>,
    {
        if let Some(url) = self.get_image_from_cache(key) {
            return Some(url);
        }

        let normalized = normalize_key(key);
        if normalized.is_empty() {
            return None;
        }

        let url = resolver(&normalized)?;
        self.cache_image(&normalized, &url);
        Some(url)
    }

    /// Record what a fetched record tells us: custom classification and,
    /// when present, its image under both its name and its id.
    pub fn remember(&self, record: &PokemonRecord) {
        if record.id.as_deref().map_or(false, |id| self.is_custom_id(id)) {
            self.register_custom(&record.name);
        }

        if let Some(url) = record.image_url.as_deref() {
            self.cache_image(&record.name, url);
            if let Some(id) = record.id.as_deref() {
                self.cache_image(id, url);
            }
        }
    }

    /// Empty both tiers and the registry.
    ///
    /// Only durable keys owned by this cache are removed.
    pub fn clear_all(&self) {
        let mut state = self.state.lock();
        state.images.clear();
        state.custom.clear();
        self.publish_entries(0);

        if self.store.is_available() {
            match self.store.keys() {
                Ok(keys) => {
                    for key in keys.iter().filter(|k| is_owned_key(k)) {
                        if let Err(e) = self.store.remove(key) {
                            warn!("Failed to remove durable key {}: {}", key, e);
                            metrics::record_durable_error("remove", &e);
                        }
                    }
                }
                Err(e) => {
                    warn!("Failed to list durable keys: {}", e);
                    metrics::record_durable_error("read", &e);
                }
            }
        }

        info!("Image cache and custom registry cleared");
    }

    /// Snapshot of cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            entries: state.images.len(),
            custom_names: state.custom.len(),
            ..state.stats.clone()
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn insert_fast(&self, state: &mut CacheState, key: String, entry: CacheEntry) {
        if let Some(evicted) = state.images.insert(key, entry) {
            debug!("Evicted oldest image entry: {}", evicted);
            state.stats.evictions += 1;
            metrics::record_cache_eviction();
        }
        self.publish_entries(state.images.len());
    }

    /// The entries gauge is process-wide, so only the installed instance sets it.
    fn publish_entries(&self, count: usize) {
        if global::is_installed(self) {
            metrics::update_cache_entries(count);
        }
    }

    /// Live durable entry for `normalized`, removing it if expired.
    fn read_durable(&self, normalized: &str, now: i64) -> Option<CacheEntry> {
        let durable_key = image_key(normalized);

        let raw = match self.store.get(&durable_key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read durable image entry {}: {}", durable_key, e);
                metrics::record_durable_error("read", &e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                let e = CacheError::from(e);
                warn!("Malformed durable image entry {}: {}", durable_key, e);
                metrics::record_durable_error("parse", &e);
                return None;
            }
        };

        if entry.is_live(now) {
            return Some(entry);
        }

        debug!("Durable image entry expired: {}", normalized);
        if let Err(e) = self.store.remove(&durable_key) {
            warn!("Failed to remove expired durable entry {}: {}", durable_key, e);
            metrics::record_durable_error("remove", &e);
        }
        None
    }

    fn write_durable(&self, normalized: &str, entry: &CacheEntry) {
        let result = serde_json::to_string(entry)
            .map_err(CacheError::from)
            .and_then(|json| self.store.set(&image_key(normalized), &json));

        if let Err(e) = result {
            warn!("Failed to persist image entry {}: {}", normalized, e);
            metrics::record_durable_error("write", &e);
        }
    }
}
