// pokedex-cache - Two-tier Pokémon image cache and custom registry
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod registry;
pub mod storage;
pub mod utils;

pub use cache::{CacheEntry, CacheStats, Expiration, PokemonCache};
pub use error::{CacheError, Result};
pub use models::PokemonRecord;
pub use storage::{DurableStore, FileStore, MemoryStore, NoopStore};
