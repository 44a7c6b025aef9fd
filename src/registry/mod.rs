//! Custom entity classification and registry.
//!
//! A "custom" entity is one that is not part of the canonical numbered
//! dataset (ids `1..=CANONICAL_ID_CEILING`). Collaborators use the helpers
//! here to avoid treating a made-up name or id as a canonical API lookup.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::cache::normalize_key;
use crate::error::Result;
use crate::storage::DurableStore;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Highest id in the canonical dataset.
pub const CANONICAL_ID_CEILING: u64 = 2000;

/// Durable key holding the JSON array of registered custom names.
pub const CUSTOM_NAMES_KEY: &str = "pokemon_custom_names";

/// Marker used for intentionally unknown or synthetic ids.
const PLACEHOLDER_MARKER: char = '?';

/// Classify an identifier against the default canonical ceiling.
///
/// - empty input → `false`
/// - contains `?` → `true`
/// - parses as an integer above [`CANONICAL_ID_CEILING`] → `true`
/// - anything else, including non-numeric names like `"abc"` → `false`
pub fn is_custom_id<I: fmt::Display + ?Sized>(id: &I) -> bool {
    is_custom_id_with_ceiling(id, CANONICAL_ID_CEILING)
}

/// [`is_custom_id`] for identifiers that may be absent.
pub fn is_custom_id_opt<I: fmt::Display>(id: Option<I>) -> bool {
    id.map_or(false, |id| is_custom_id(&id))
}

pub fn is_custom_id_with_ceiling<I: fmt::Display + ?Sized>(id: &I, ceiling: u64) -> bool {
    let raw = id.to_string();
    if raw.is_empty() {
        return false;
    }

    if raw.contains(PLACEHOLDER_MARKER) {
        return true;
    }

    match parse_leading_integer(&raw) {
        Some(value) => value > i128::from(ceiling),
        // Unparseable names are not custom unless registered by name
        None => false,
    }
}

/// Parse the integer prefix of `input`.
///
/// Leading whitespace and a single sign are accepted, then as many decimal
/// digits as follow; the rest of the string is ignored (`"25abc"` → 25).
/// Returns `None` when no digit is found. Values too large for `i128`
/// saturate.
fn parse_leading_integer(input: &str) -> Option<i128> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i128 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(10) else {
            break;
        };
        seen_digit = true;
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i128::from(digit)))
            .unwrap_or(i128::MAX);
    }

    if !seen_digit {
        return None;
    }

    Some(if negative { -value } else { value })
}

/// In-process set of normalized custom names.
#[derive(Debug, Default, Clone)]
pub struct CustomRegistry {
    names: HashSet<String>,
}

impl CustomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already-normalized name. Returns `true` if it was new.
    pub fn insert(&mut self, normalized: String) -> bool {
        self.names.insert(normalized)
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.names.contains(normalized)
    }

    /// Merge names, normalizing each. Returns how many were new.
    pub fn merge<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| normalize_key(name.as_ref()))
            .filter(|name| !name.is_empty())
            .filter(|name| self.names.insert(name.clone()))
            .count()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    /// Sorted copy of the registered names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort();
        names
    }
}

/// Read the durable snapshot of custom names.
///
/// Absent or malformed snapshots yield an empty list; failures are logged,
/// never returned.
pub fn load_snapshot(store: &dyn DurableStore) -> Vec<String> {
    let raw = match store.get(CUSTOM_NAMES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Failed to read stored custom names: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(names) => names,
        Err(e) => {
            warn!("Stored custom names are malformed, ignoring: {}", e);
            Vec::new()
        }
    }
}

/// Append `normalized` to the durable snapshot unless already present.
pub fn append_to_snapshot(store: &dyn DurableStore, normalized: &str) -> Result<()> {
    let mut names = load_snapshot(store);
    if names.iter().any(|n| n == normalized) {
        debug!("Custom name {} already in durable snapshot", normalized);
        return Ok(());
    }

    names.push(normalized.to_string());
    store.set(CUSTOM_NAMES_KEY, &serde_json::to_string(&names)?)
}
