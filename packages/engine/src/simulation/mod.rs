//! Simulation - frame orchestration for one image
//!
//! `SimulationCore` owns everything a running sketch needs: the immutable
//! configuration, the grid, the reveal scanner, the frame cache, the random
//! source and perf counters. The stages themselves live in `systems/`; this
//! module only decides the order they run in.
//!
//! Frame order:
//! 1. first frame only: start the scanner (reveals everything when scanning
//!    is off)
//! 2. advance the scan line and reveal the rows above it
//! 3. bump the frame counter, run physics every `simulation_speed` frames
//! 4. record the visible particles into the frame cache
//!
//! While replaying, steps only advance the replay cursor.

use image::RgbaImage;

use crate::core::grid::GridStore;
use crate::core::random::{RandomSource, Xorshift32};
use crate::domain::SandConfig;
use crate::systems::cache::{FrameCache, ReplayToggle, VisiblePixel};
use crate::systems::classify::ClassificationSummary;
use crate::systems::preprocess::prepare_image;
use crate::systems::reveal::RevealScanner;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/source.rs"]
mod source;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "render/raster.rs"]
mod raster;
mod facade;

pub use facade::Sandfall;
pub use perf_stats::PerfStats;
pub use render_extract::should_show;
pub use source::{decode_image, image_from_raw, placeholder_image, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};

use perf_timer::PerfTimer;

/// One running sandfall sketch
pub struct SimulationCore {
    config: SandConfig,
    grid: GridStore,
    scanner: RevealScanner,
    cache: FrameCache,
    rng: Box<dyn RandomSource>,

    // Kept for reset(); populated grids are rebuilt from it
    prepared: RgbaImage,
    summary: ClassificationSummary,

    // State
    frame: u64,
    physics_ticks: u64,
    started: bool,
    replay_shown: Option<usize>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SimulationCore {
    /// Preprocess `source` and populate a grid from it
    pub fn from_image(source: &RgbaImage, config: SandConfig) -> Self {
        let config = config.sanitized();
        let rng = Box::new(Xorshift32::new(config.seed));
        Self::with_random_source(source, config, rng)
    }

    /// Like `from_image`, with an injected random source
    pub fn with_random_source(source: &RgbaImage, config: SandConfig, rng: Box<dyn RandomSource>) -> Self {
        let config = config.sanitized();
        let prepared = prepare_image(source, &config);
        init::create_core(prepared, config, rng)
    }

    /// Use `prepared` as-is: one pixel per cell, no resize or dither
    pub fn from_prepared(prepared: RgbaImage, config: SandConfig, rng: Box<dyn RandomSource>) -> Self {
        init::create_core(prepared, config.sanitized(), rng)
    }

    /// Decode PNG/JPEG bytes; falls back to the placeholder gradient
    pub fn from_encoded(bytes: &[u8], config: SandConfig) -> Self {
        let image = source::or_placeholder(decode_image(bytes));
        Self::from_image(&image, config)
    }

    /// Raw RGBA or RGB pixels; falls back to the placeholder gradient
    pub fn from_raw(data: &[u8], width: u32, height: u32, config: SandConfig) -> Self {
        let image = source::or_placeholder(image_from_raw(data, width, height));
        Self::from_image(&image, config)
    }

    pub fn from_placeholder(config: SandConfig) -> Self {
        Self::from_image(&placeholder_image(), config)
    }

    pub fn config(&self) -> &SandConfig { &self.config }

    pub fn grid(&self) -> &GridStore { &self.grid }

    pub fn cols(&self) -> u32 { self.grid.cols() }

    pub fn rows(&self) -> u32 { self.grid.rows() }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn physics_ticks(&self) -> u64 { self.physics_ticks }

    pub fn scan_line(&self) -> f32 { self.scanner.scan_line() }

    pub fn classification(&self) -> &ClassificationSummary { &self.summary }

    pub fn particle_count(&self) -> usize { self.grid.particle_count() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    /// Advance one frame (live) or one replay frame
    pub fn step(&mut self) {
        step::step(self);
    }

    // === Replay ===

    pub fn toggle_replay(&mut self) -> ReplayToggle {
        let result = self.cache.toggle_replay();
        if result == ReplayToggle::Started {
            self.replay_shown = None;
        }
        result
    }

    pub fn is_replaying(&self) -> bool { self.cache.is_replaying() }

    pub fn has_cache(&self) -> bool { !self.cache.is_empty() }

    pub fn cached_frames(&self) -> usize { self.cache.len() }

    /// More than `replay_ready_frames` frames are recorded
    pub fn replay_ready(&self) -> bool {
        self.cache.len() > self.config.replay_ready_frames
    }

    /// Drop the cache and rebuild the grid from the retained prepared image
    pub fn reset(&mut self) {
        init::reset_core(self);
    }

    // === Rendering ===

    /// Particles to draw for the current frame (live grid or replayed frame)
    pub fn visible_pixels(&self) -> Vec<VisiblePixel> {
        if self.cache.is_replaying() {
            let idx = self.replay_shown.unwrap_or(0);
            return self.cache.frame(idx).map(<[VisiblePixel]>::to_vec).unwrap_or_default();
        }
        render_extract::visible_pixels(&self.grid)
    }

    /// Flat `[col, row, color, ...]` triples for the JS renderer
    pub fn frame_pixels(&self) -> Vec<u32> {
        render_extract::flatten(&self.visible_pixels())
    }

    /// Rasterize the current frame, `scale` output pixels per canvas pixel.
    /// Fails when the canvas would be too large to allocate.
    pub fn render_rgba(&self, scale: u32) -> Result<RgbaImage, String> {
        raster::rasterize(
            &self.visible_pixels(),
            self.grid.cols(),
            self.grid.rows(),
            self.config.cell_size,
            self.config.pixel_border_size,
            scale.max(1),
        )
    }

    /// High-resolution still of the current frame as PNG bytes
    pub fn export_png(&self, scale: Option<u32>) -> Result<Vec<u8>, String> {
        let scale = scale.unwrap_or(self.config.export_scale).clamp(1, 16);
        let image = self.render_rgba(scale)?;
        sand_log!("exporting {}x{} still", image.width(), image.height());
        raster::encode_png(&image)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
