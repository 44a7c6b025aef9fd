// Cache key normalization and durable key layout
// Author: kelexine (https://github.com/kelexine)

use std::fmt;

/// Prefix shared by every durable key this crate owns.
pub const KEY_PREFIX: &str = "pokemon_";

/// Prefix of durable image entries: `pokemon_img_<normalized key>`.
pub const IMAGE_KEY_PREFIX: &str = "pokemon_img_";

/// Canonical form of an identifier: its string form, lower-cased and trimmed.
///
/// Every lookup and write goes through this function, so `"Pikachu "`,
/// `"PIKACHU"` and `"pikachu"` address the same entry, as do `25` and `"25"`.
pub fn normalize_key<K: fmt::Display + ?Sized>(key: &K) -> String {
    key.to_string().to_lowercase().trim().to_string()
}

/// Durable key for an already-normalized image key.
pub fn image_key(normalized: &str) -> String {
    format!("{}{}", IMAGE_KEY_PREFIX, normalized)
}

/// Whether a durable key belongs to this crate.
pub fn is_owned_key(key: &str) -> bool {
    key.starts_with(KEY_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Pikachu"), "pikachu");
        assert_eq!(normalize_key("  MR. MIME \n"), "mr. mime");
        assert_eq!(normalize_key(&25), "25");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn test_image_key_layout() {
        assert_eq!(image_key("pikachu"), "pokemon_img_pikachu");
        assert!(is_owned_key(&image_key("25")));
        assert!(is_owned_key("pokemon_custom_names"));
        assert!(!is_owned_key("theme"));
    }
}
