// Fast tier: bounded, insertion-ordered image cache
// Author: kelexine (https://github.com/kelexine)

use crate::cache::models::CacheEntry;
use indexmap::IndexMap;

/// Result of a fast-tier read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Hit(String),
    /// The entry existed but had expired and has been removed.
    Expired,
    Miss,
}

/// In-process map of normalized key to [`CacheEntry`].
///
/// Eviction is FIFO by insertion order and reads never reorder anything. A
/// write at capacity always evicts the oldest entry first, even when the key
/// being written is already present.
#[derive(Debug, Clone)]
pub struct ImageCache {
    entries: IndexMap<String, CacheEntry>,
    capacity: usize,
}

impl ImageCache {
    /// `capacity` is clamped to at least one entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Look up a normalized key, removing it if it has expired.
    pub fn lookup(&mut self, key: &str, now_millis: i64) -> Lookup {
        let live = match self.entries.get(key) {
            Some(entry) => entry.is_live(now_millis).then(|| entry.url.clone()),
            None => return Lookup::Miss,
        };

        match live {
            Some(url) => Lookup::Hit(url),
            None => {
                self.entries.shift_remove(key);
                Lookup::Expired
            }
        }
    }

    /// Insert or replace an entry. Returns the key evicted to make room, if any.
    ///
    /// A key that survives eviction keeps its position; a key that was itself
    /// the oldest is re-inserted at the back.
    pub fn insert(&mut self, key: String, entry: CacheEntry) -> Option<String> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0).map(|(key, _)| key)
        } else {
            None
        };

        self.entries.insert(key, entry);
        evicted
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys in insertion order, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str) -> CacheEntry {
        CacheEntry::new(url, None)
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let mut cache = ImageCache::new(3);
        assert_eq!(cache.insert("a".into(), entry("1")), None);
        assert_eq!(cache.insert("b".into(), entry("2")), None);
        assert_eq!(cache.insert("c".into(), entry("3")), None);

        // Reading "a" does not protect it
        assert_eq!(cache.lookup("a", 0), Lookup::Hit("1".into()));

        assert_eq!(cache.insert("d".into(), entry("4")), Some("a".into()));
        assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_replace_below_capacity_keeps_position() {
        let mut cache = ImageCache::new(3);
        cache.insert("a".into(), entry("1"));
        cache.insert("b".into(), entry("2"));

        assert_eq!(cache.insert("a".into(), entry("1b")), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.lookup("a", 0), Lookup::Hit("1b".into()));
        assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_replace_at_capacity_evicts_oldest() {
        let mut cache = ImageCache::new(3);
        cache.insert("a".into(), entry("1"));
        cache.insert("b".into(), entry("2"));
        cache.insert("c".into(), entry("3"));

        assert_eq!(cache.insert("b".into(), entry("2b")), Some("a".into()));
        assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(cache.lookup("b", 0), Lookup::Hit("2b".into()));
    }

    #[test]
    fn test_replace_oldest_at_capacity_moves_it_to_back() {
        let mut cache = ImageCache::new(2);
        cache.insert("a".into(), entry("1"));
        cache.insert("b".into(), entry("2"));

        assert_eq!(cache.insert("a".into(), entry("1b")), Some("a".into()));
        assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(cache.lookup("a", 0), Lookup::Hit("1b".into()));
    }

    #[test]
    fn test_expired_entry_removed_on_lookup() {
        let mut cache = ImageCache::new(2);
        cache.insert("a".into(), CacheEntry::new("1", Some(100)));

        assert_eq!(cache.lookup("a", 99), Lookup::Hit("1".into()));
        assert_eq!(cache.lookup("a", 100), Lookup::Expired);
        assert!(!cache.contains("a"));
        assert_eq!(cache.lookup("a", 100), Lookup::Miss);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = ImageCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert("a".into(), entry("1"));
        assert_eq!(cache.insert("b".into(), entry("2")), Some("a".into()));
        assert_eq!(cache.len(), 1);
    }
}
