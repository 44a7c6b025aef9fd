//! Cache entry, expiration and statistics models.

// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// A resolved image URL with its absolute expiry.
///
/// Serialized form is the durable layout `{"url": "...", "expires": 1700000000000}`
/// with `"expires": null` for permanent entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Resolved image location.
    pub url: String,
    /// Milliseconds since the Unix epoch; `None` never expires.
    #[serde(rename = "expires", default)]
    pub expires_at: Option<i64>,
}

impl CacheEntry {
    pub fn new(url: impl Into<String>, expires_at: Option<i64>) -> Self {
        Self {
            url: url.into(),
            expires_at,
        }
    }

    /// Live entries have no expiry or an expiry strictly in the future.
    pub fn is_live(&self, now_millis: i64) -> bool {
        self.expires_at.map_or(true, |expires| expires > now_millis)
    }
}

/// How long a cached image stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Expire this many minutes after the write. Zero means never.
    Minutes(u64),
    /// Never expire.
    Never,
}

impl Expiration {
    /// Absolute expiry for a write happening at `now_millis`.
    pub fn expires_at(self, now_millis: i64) -> Option<i64> {
        match self {
            Expiration::Never | Expiration::Minutes(0) => None,
            Expiration::Minutes(minutes) => {
                let offset = i64::try_from(minutes)
                    .unwrap_or(i64::MAX)
                    .saturating_mul(MILLIS_PER_MINUTE);
                Some(now_millis.saturating_add(offset))
            }
        }
    }
}

impl From<Option<u64>> for Expiration {
    fn from(minutes: Option<u64>) -> Self {
        minutes.map_or(Expiration::Never, Expiration::Minutes)
    }
}

/// Statistics for cache operations.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads served by the fast tier.
    pub hits: u64,
    /// Reads served by promoting a durable entry.
    pub durable_hits: u64,
    /// Reads that found nothing live.
    pub misses: u64,
    /// Entries dropped to stay within capacity.
    pub evictions: u64,
    /// Expired entries discovered on read.
    pub expirations: u64,
    /// Current fast-tier size.
    pub entries: usize,
    /// Current number of registered custom names.
    pub custom_names: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_liveness() {
        assert!(CacheEntry::new("u", None).is_live(i64::MAX));
        assert!(CacheEntry::new("u", Some(1_000)).is_live(999));
        assert!(!CacheEntry::new("u", Some(1_000)).is_live(1_000));
    }

    #[test]
    fn test_expiration_offsets() {
        assert_eq!(Expiration::Minutes(1).expires_at(0), Some(60_000));
        assert_eq!(Expiration::Minutes(0).expires_at(5), None);
        assert_eq!(Expiration::Never.expires_at(5), None);
        assert_eq!(Expiration::Minutes(u64::MAX).expires_at(1), Some(i64::MAX));
        assert_eq!(Expiration::from(None), Expiration::Never);
    }

    #[test]
    fn test_durable_json_layout() {
        let entry = CacheEntry::new("https://img/25.png", Some(1_700_000_000_000));
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"url":"https://img/25.png","expires":1700000000000}"#
        );

        let permanent = CacheEntry::new("https://img/1.png", None);
        assert_eq!(
            serde_json::to_string(&permanent).unwrap(),
            r#"{"url":"https://img/1.png","expires":null}"#
        );

        let parsed: CacheEntry = serde_json::from_str(r#"{"url":"x"}"#).unwrap();
        assert_eq!(parsed.expires_at, None);
    }
}
