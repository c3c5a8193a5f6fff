//! Domain types: particles, cells and engine configuration

pub mod config;
pub mod particle;

pub use config::SandConfig;
pub use particle::{Cell, FallCategory, Particle};
