// Property tests for key normalization and classification
// Author: kelexine (https://github.com/kelexine)

use pokedex_cache::cache::normalize_key;
use pokedex_cache::registry::is_custom_id;
use pokedex_cache::PokemonCache;
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in "[ \\ta-zA-Z0-9À-ÖØ-öø-ÿ]{0,24}") {
        let once = normalize_key(raw.as_str());
        prop_assert_eq!(normalize_key(once.as_str()), once.clone());
    }

    #[test]
    fn equal_normalized_keys_hit(
        name in "[a-zA-Z][a-zA-Z0-9 .-]{0,16}",
        left in " {0,3}",
        right in " {0,3}",
    ) {
        let cache = PokemonCache::in_memory_only();
        let written = format!("{}{}{}", left, name.to_uppercase(), right);
        cache.cache_image(written.as_str(), "https://img/p.png");

        prop_assert_eq!(
            cache.get_image_from_cache(name.to_lowercase().as_str()),
            Some("https://img/p.png".to_string())
        );
    }

    #[test]
    fn numeric_ids_custom_above_ceiling(id in 0u64..100_000) {
        prop_assert_eq!(is_custom_id(&id), id > 2000);
        prop_assert_eq!(is_custom_id(id.to_string().as_str()), id > 2000);
    }

    #[test]
    fn placeholder_ids_always_custom(prefix in "[a-z0-9]{0,5}", suffix in "[a-z0-9]{0,5}") {
        let id = format!("{}?{}", prefix, suffix);
        prop_assert!(is_custom_id(id.as_str()));
    }
}
