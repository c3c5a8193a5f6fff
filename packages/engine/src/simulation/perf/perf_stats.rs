use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) reveal_ms: f64,
    pub(super) physics_ms: f64,
    pub(super) cache_ms: f64,
    pub(super) particles_moved: u32,
    pub(super) particles_dormant: u32,
    pub(super) visible_particles: u32,
    pub(super) cached_frames: u32,
    pub(super) physics_ticks: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

impl Default for PerfStats {
    fn default() -> Self {
        PerfStats {
            step_ms: 0.0,
            reveal_ms: 0.0,
            physics_ms: 0.0,
            cache_ms: 0.0,
            particles_moved: 0,
            particles_dormant: 0,
            visible_particles: 0,
            cached_frames: 0,
            physics_ticks: 0,
        }
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn reveal_ms(&self) -> f64 { self.reveal_ms }
    #[wasm_bindgen(getter)]
    pub fn physics_ms(&self) -> f64 { self.physics_ms }
    #[wasm_bindgen(getter)]
    pub fn cache_ms(&self) -> f64 { self.cache_ms }
    #[wasm_bindgen(getter)]
    pub fn particles_moved(&self) -> u32 { self.particles_moved }
    #[wasm_bindgen(getter)]
    pub fn particles_dormant(&self) -> u32 { self.particles_dormant }
    #[wasm_bindgen(getter)]
    pub fn visible_particles(&self) -> u32 { self.visible_particles }
    #[wasm_bindgen(getter)]
    pub fn cached_frames(&self) -> u32 { self.cached_frames }
    #[wasm_bindgen(getter)]
    pub fn physics_ticks(&self) -> u32 { self.physics_ticks }
}
