//! Sandfall Engine - image-driven falling sand in WASM
//!
//! An image is resized to the simulation grid, Bayer-dithered, and every
//! pixel becomes a particle whose fall behavior depends on its brightness
//! rank. A scan line reveals the image row by row while bright particles sink
//! through darker ones; frames are cached and can be replayed in a loop.
//!
//! Architecture:
//! - core/        - grid arena, random sources, logging macros
//! - domain/      - particles and configuration
//! - systems/     - preprocess, classify, reveal, physics, cache
//! - simulation/  - frame orchestration and the JS facade

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
    pub use web_sys;
}

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    sand_log!("Sandfall engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::grid::GridStore;
pub use crate::core::random::{RandomSource, SequenceSource, Xorshift32};
pub use domain::{Cell, FallCategory, Particle, SandConfig};
pub use simulation::{PerfStats, Sandfall, SimulationCore};
pub use systems::cache::{FrameCache, ReplayToggle, VisiblePixel};
