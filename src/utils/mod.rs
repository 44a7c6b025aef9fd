//! Utility functions and helpers for pokedex-cache.
//!
//! # Submodules
//!
//! - `logging`: Tracing subscriber initialization.
//! - `time`: Millisecond clocks used for entry expiry.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
pub mod time;
