//! Systems - the stages a frame passes through
//!
//! preprocess -> classify (once), then per frame: reveal -> physics -> cache.

pub mod cache;
pub mod classify;
pub mod physics;
pub mod preprocess;
pub mod reveal;

pub use cache::{FrameCache, ReplayToggle, VisiblePixel};
pub use physics::{step_physics, PhysicsOutcome};
pub use reveal::RevealScanner;
