use wasm_bindgen::prelude::*;
use image::RgbaImage;

use crate::domain::SandConfig;
use crate::systems::cache::ReplayToggle;

use super::perf_stats::PerfStats;
use super::SimulationCore;

fn parse_config(config_json: Option<String>) -> Result<SandConfig, JsValue> {
    match config_json {
        Some(json) if !json.trim().is_empty() => {
            SandConfig::from_json(&json).map_err(|e| JsValue::from_str(&e))
        }
        _ => Ok(SandConfig::default()),
    }
}

#[wasm_bindgen]
pub struct Sandfall {
    core: SimulationCore,
}

#[wasm_bindgen]
impl Sandfall {
    /// Create a sketch from encoded image bytes (PNG/JPEG).
    /// Undecodable bytes fall back to the placeholder gradient.
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8], config_json: Option<String>) -> Result<Sandfall, JsValue> {
        let config = parse_config(config_json)?;
        Ok(Self {
            core: SimulationCore::from_encoded(bytes, config),
        })
    }

    /// Create a sketch from raw RGBA (or RGB) pixels, e.g. `ImageData.data`
    #[wasm_bindgen(js_name = fromRgba)]
    pub fn from_rgba(data: &[u8], width: u32, height: u32, config_json: Option<String>) -> Result<Sandfall, JsValue> {
        let config = parse_config(config_json)?;
        Ok(Self {
            core: SimulationCore::from_raw(data, width, height, config),
        })
    }

    #[wasm_bindgen(js_name = withPlaceholder)]
    pub fn with_placeholder(config_json: Option<String>) -> Result<Sandfall, JsValue> {
        let config = parse_config(config_json)?;
        Ok(Self {
            core: SimulationCore::from_placeholder(config),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> u32 { self.core.cols() }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 { self.core.rows() }

    #[wasm_bindgen(getter)]
    pub fn cell_size(&self) -> u32 { self.core.config().cell_size }

    #[wasm_bindgen(getter)]
    pub fn pixel_border_size(&self) -> f32 { self.core.config().pixel_border_size }

    #[wasm_bindgen(getter)]
    pub fn scan_line(&self) -> f32 { self.core.scan_line() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    /// Effective (sanitized) configuration as JSON
    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    /// Advance one frame (or one replay frame)
    pub fn step(&mut self) {
        self.core.step();
    }

    /// Visible particles of the current frame as flat `[col, row, color, ...]`
    pub fn frame_pixels(&self) -> Vec<u32> {
        self.core.frame_pixels()
    }

    /// RGBA bytes of the current frame, `cols * cell_size * scale` wide
    pub fn render_rgba(&self, scale: u32) -> Result<Vec<u8>, JsValue> {
        self.core
            .render_rgba(scale)
            .map(RgbaImage::into_raw)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// PNG still of the current frame; defaults to the configured export scale
    pub fn export_png(&self, scale: Option<u32>) -> Result<Vec<u8>, JsValue> {
        self.core.export_png(scale).map_err(|e| JsValue::from_str(&e))
    }

    // === REPLAY API ===

    /// Start or stop the replay loop. Returns whether replay is now running.
    pub fn toggle_replay(&mut self) -> bool {
        !matches!(self.core.toggle_replay(), ReplayToggle::Stopped | ReplayToggle::Empty)
    }

    #[wasm_bindgen(getter)]
    pub fn is_replaying(&self) -> bool { self.core.is_replaying() }

    #[wasm_bindgen(getter)]
    pub fn has_cache(&self) -> bool { self.core.has_cache() }

    #[wasm_bindgen(getter)]
    pub fn replay_ready(&self) -> bool { self.core.replay_ready() }

    #[wasm_bindgen(getter)]
    pub fn cached_frames(&self) -> u32 { self.core.cached_frames() as u32 }

    /// Clear the cache and start over from the same image
    pub fn reset(&mut self) {
        self.core.reset();
    }
}
