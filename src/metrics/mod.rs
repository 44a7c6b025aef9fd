// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

use crate::error::CacheError;

pub use registry::{
    gather_metrics,
    CUSTOM_REGISTRATIONS,
    DURABLE_STORE_ERRORS,
    IMAGE_CACHE_ENTRIES,
    IMAGE_CACHE_OPERATIONS,
};

/// Helpers to record image cache operations
pub fn record_cache_hit() {
    IMAGE_CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_durable_hit() {
    IMAGE_CACHE_OPERATIONS.with_label_values(&["durable_hit"]).inc();
}

pub fn record_cache_miss() {
    IMAGE_CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn record_cache_expired() {
    IMAGE_CACHE_OPERATIONS.with_label_values(&["expired"]).inc();
}

pub fn record_cache_eviction() {
    IMAGE_CACHE_OPERATIONS.with_label_values(&["eviction"]).inc();
}

pub fn record_cache_store() {
    IMAGE_CACHE_OPERATIONS.with_label_values(&["store"]).inc();
}

pub fn update_cache_entries(count: usize) {
    IMAGE_CACHE_ENTRIES.set(count as f64);
}

/// Helper to record first-time custom registrations
pub fn record_custom_registration() {
    CUSTOM_REGISTRATIONS.inc();
}

/// Helper to record a durable store failure that was swallowed
pub fn record_durable_error(operation: &str, error: &CacheError) {
    DURABLE_STORE_ERRORS
        .with_label_values(&[operation, error.kind()])
        .inc();
}
