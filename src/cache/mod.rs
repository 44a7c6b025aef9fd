// Image resolution cache module
// Author: kelexine (https://github.com/kelexine)

pub mod global;
pub mod image;
pub mod key;
pub mod manager;
pub mod models;

pub use image::ImageCache;
pub use key::{image_key, normalize_key, IMAGE_KEY_PREFIX, KEY_PREFIX};
pub use manager::PokemonCache;
pub use models::{CacheEntry, CacheStats, Expiration};

/// Maximum number of fast-tier entries by default.
pub const MAX_CACHE_SIZE: usize = 100;

/// Expiration applied by `cache_image` by default, in minutes.
pub const DEFAULT_EXPIRATION_MINUTES: u64 = 60;
