// Process-wide cache handle
// Author: kelexine (https://github.com/kelexine)
//
// Prefer passing a `PokemonCache` explicitly. This handle exists for call
// sites that cannot be reached by injection; it holds at most one instance
// for the life of the process.

use super::PokemonCache;
use crate::metrics;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

static PROCESS_CACHE: OnceCell<Arc<PokemonCache>> = OnceCell::new();

/// Install `cache` as the process-wide instance and initialize it.
///
/// Returns the installed instance, which is the previously installed one if
/// another call won.
pub fn install(cache: PokemonCache) -> Arc<PokemonCache> {
    let installed = PROCESS_CACHE
        .get_or_init(|| {
            debug!("Installing process-wide Pokémon cache");
            let cache = Arc::new(cache);
            cache.init();
            cache
        })
        .clone();
    metrics::update_cache_entries(installed.stats().entries);
    installed
}

/// The process-wide instance, if one has been installed.
pub fn get() -> Option<Arc<PokemonCache>> {
    PROCESS_CACHE.get().cloned()
}

/// Whether `cache` is the installed process-wide instance.
pub(crate) fn is_installed(cache: &PokemonCache) -> bool {
    PROCESS_CACHE
        .get()
        .is_some_and(|installed| std::ptr::eq(Arc::as_ptr(installed), cache))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_keeps_first_instance() {
        let first = install(PokemonCache::in_memory_only());
        first.register_custom("globalmon");

        let second = install(PokemonCache::in_memory_only());

        assert!(Arc::ptr_eq(&first, &second));
        assert!(second.is_custom_name("GlobalMon"));
        assert!(get().is_some_and(|cache| Arc::ptr_eq(&cache, &first)));
    }

    #[test]
    fn test_entries_gauge_follows_installed_instance() {
        let installed = install(PokemonCache::in_memory_only());
        installed.cache_image("gauge-mon", "https://img/gauge.png");

        let local = PokemonCache::in_memory_only();
        assert!(!is_installed(&local));
        for i in 0..5 {
            local.cache_image(&format!("local-{}", i), "https://img/local.png");
        }
        local.clear_all();

        assert!(is_installed(&installed));
        assert_eq!(
            metrics::IMAGE_CACHE_ENTRIES.get() as usize,
            installed.stats().entries
        );
    }
}
