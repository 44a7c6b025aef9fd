// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_gauge_with_registry,
    register_int_counter_with_registry, CounterVec, Encoder, Gauge, IntCounter, Opts, Registry,
    TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // IMAGE CACHE METRICS
    // ============================================================================

    /// Image cache operations
    pub static ref IMAGE_CACHE_OPERATIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("image_cache_operations_total", "Total image cache operations"),
        &["operation"], // operation: hit, durable_hit, miss, expired, eviction, store
        REGISTRY
    ).unwrap();

    /// Fast-tier entries of the process-wide instance (`cache::global`)
    pub static ref IMAGE_CACHE_ENTRIES: Gauge = register_gauge_with_registry!(
        Opts::new("image_cache_entries", "Current number of fast-tier image entries in the installed cache"),
        REGISTRY
    ).unwrap();

    // ============================================================================
    // REGISTRY METRICS
    // ============================================================================

    /// First-time custom registrations
    pub static ref CUSTOM_REGISTRATIONS: IntCounter = register_int_counter_with_registry!(
        Opts::new("custom_registrations_total", "Total custom entity registrations"),
        REGISTRY
    ).unwrap();

    // ============================================================================
    // DURABLE STORE METRICS
    // ============================================================================

    /// Swallowed durable store failures
    pub static ref DURABLE_STORE_ERRORS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("durable_store_errors_total", "Durable store failures degraded to no-ops"),
        &["operation", "kind"], // operation: read, write, remove, parse; kind: CacheError::kind
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
