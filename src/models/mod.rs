//! Records exchanged with the data-fetching layer.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod pokemon;

pub use pokemon::PokemonRecord;
