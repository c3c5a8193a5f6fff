//! SandConfig - immutable engine configuration
//!
//! Built once (defaults, JSON, or the persisted key/value pairs the sketch
//! page stores) and handed to every component. Nothing reads configuration
//! from ambient state during a tick.

use serde::{Deserialize, Serialize};

/// Largest grid side, in pixels, before `resolution_scale` halves it
pub const DEFAULT_MAX_DIMENSION: u32 = 2400;
/// Pixels per cell on the canvas
pub const DEFAULT_CELL_SIZE: u32 = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SandConfig {
    /// Frames between physics ticks (>= 1)
    #[serde(rename = "simSpeed")]
    pub simulation_speed: u32,
    /// Frames between scan line advances (>= 1)
    pub scan_speed: u32,
    /// Brightest fraction of cells that become fast/upward fallers
    pub top_threshold: f32,
    /// Brightest fraction of cells that fall at all
    pub middle_threshold: f32,
    /// Travel cap in cells
    #[serde(rename = "maxFall")]
    pub max_fall_distance: u32,
    /// Probability that a top-tier particle rises instead of falling
    pub upward_chance: f32,
    pub enable_scan: bool,
    /// Each increment halves the target resolution
    pub resolution_scale: u32,
    /// Fraction of the cell covered by the drawn square, in (0, 1]
    #[serde(rename = "pixelBorder")]
    pub pixel_border_size: f32,
    pub cell_size: u32,
    pub max_dimension: u32,
    /// Skip particles that have been stationary for a while
    pub dormancy: bool,
    pub dormant_after: u16,
    /// Cached frames needed before the replay affordance is offered
    pub replay_ready_frames: usize,
    pub export_scale: u32,
    pub seed: u32,
}

impl Default for SandConfig {
    fn default() -> Self {
        Self {
            simulation_speed: 1,
            scan_speed: 2,
            top_threshold: 0.05,
            middle_threshold: 0.30,
            max_fall_distance: 300,
            upward_chance: 0.1,
            enable_scan: true,
            resolution_scale: 3,
            pixel_border_size: 0.75,
            cell_size: DEFAULT_CELL_SIZE,
            max_dimension: DEFAULT_MAX_DIMENSION,
            dormancy: true,
            dormant_after: 30,
            replay_ready_frames: 60,
            export_scale: 4,
            seed: 12345,
        }
    }
}

impl SandConfig {
    /// Parse a JSON object; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: SandConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Ok(config.sanitized())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Build from persisted string pairs (the sketch page's storage).
    ///
    /// Unknown keys are ignored; unparsable values keep the default and are
    /// reported.
    pub fn from_storage<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = SandConfig::default();
        for (key, value) in pairs {
            if let Err(e) = config.apply_override(key.as_ref(), value.as_ref()) {
                sand_warn!("ignoring stored setting {}: {}", key.as_ref(), e);
            }
        }
        config.sanitized()
    }

    /// Apply one stored override. Returns `Ok(false)` for keys this engine
    /// does not recognize.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<bool, String> {
        let value = value.trim();
        match key {
            "simSpeed" => self.simulation_speed = parse_int(value)?,
            "scanSpeed" => self.scan_speed = parse_int(value)?,
            "topThreshold" => self.top_threshold = parse_float(value)?,
            "middleThreshold" => self.middle_threshold = parse_float(value)?,
            // The page stores the cap in canvas pixels
            "maxFall" => self.max_fall_distance = parse_int(value)? / self.cell_size.max(1),
            "upwardChance" => self.upward_chance = parse_float(value)?,
            // Stored as a string; anything but "false" enables the scan
            "enableScan" => self.enable_scan = value != "false",
            "resolutionScale" => self.resolution_scale = parse_int(value)?,
            "pixelBorder" => self.pixel_border_size = parse_float(value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Clamp every knob into its documented range
    pub fn sanitized(mut self) -> Self {
        let defaults = SandConfig::default();
        self.simulation_speed = self.simulation_speed.max(1);
        self.scan_speed = self.scan_speed.max(1);
        self.top_threshold = clamp_or(self.top_threshold, 0.0, 1.0, defaults.top_threshold);
        self.middle_threshold =
            clamp_or(self.middle_threshold, 0.0, 1.0, defaults.middle_threshold).max(self.top_threshold);
        self.max_fall_distance = self.max_fall_distance.max(1);
        self.upward_chance = clamp_or(self.upward_chance, 0.0, 1.0, defaults.upward_chance);
        self.resolution_scale = self.resolution_scale.clamp(1, 16);
        self.pixel_border_size = clamp_or(self.pixel_border_size, 0.01, 1.0, defaults.pixel_border_size);
        self.cell_size = self.cell_size.max(1);
        self.max_dimension = self.max_dimension.max(1);
        self.export_scale = self.export_scale.clamp(1, 16);
        self
    }
}

fn parse_int(value: &str) -> Result<u32, String> {
    value.parse::<u32>().map_err(|e| format!("{value:?}: {e}"))
}

fn parse_float(value: &str) -> Result<f32, String> {
    value.parse::<f32>().map_err(|e| format!("{value:?}: {e}"))
}

fn clamp_or(v: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    if v.is_nan() {
        fallback
    } else {
        v.clamp(lo, hi)
    }
}
