//! Core building blocks: logging macros, the double-buffered grid and the
//! injected random source.

#[macro_use]
pub mod utils;
pub mod grid;
pub mod random;
