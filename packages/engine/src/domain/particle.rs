//! Particle - per-cell state record
//!
//! Particles are created once from the classified image and afterwards only
//! move between cells. Everything here is `Copy` so the double-buffered grid
//! can shuttle them between buffers without allocation.

use serde::{Deserialize, Serialize};

/// Behavior class assigned at classification time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FallCategory {
    #[default]
    None = 0,
    SlowDown = 1,
    FastDown = 2,
    Upward = 3,
}

impl FallCategory {
    #[inline]
    pub fn is_upward(self) -> bool {
        self == FallCategory::Upward
    }

    #[inline]
    pub fn is_downward(self) -> bool {
        matches!(self, FallCategory::SlowDown | FallCategory::FastDown)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Inverse of brightness in [0, 1]; informational only
    pub density: f32,
    /// Packed 0xRRGGBB
    pub color: u32,
    /// (r + g + b) / 3, the ranking key for every movement decision
    pub brightness: f32,
    pub can_fall: bool,
    pub fall_category: FallCategory,
    /// Set once by the reveal scanner, never cleared
    pub revealed: bool,
    pub dormant: bool,
    pub dormant_frames: u16,
}

impl Particle {
    pub fn from_rgb(r: u8, g: u8, b: u8, fall_category: FallCategory) -> Self {
        let brightness = brightness_of(r, g, b);
        Self {
            density: 1.0 - brightness / 255.0,
            color: pack_rgb(r, g, b),
            brightness,
            can_fall: fall_category != FallCategory::None,
            fall_category,
            revealed: false,
            dormant: false,
            dormant_frames: 0,
        }
    }

    /// Gray particle with the given brightness (handy for hand-built grids)
    pub fn with_brightness(brightness: u8, fall_category: FallCategory) -> Self {
        Self::from_rgb(brightness, brightness, brightness, fall_category)
    }

    pub fn revealed(mut self) -> Self {
        self.revealed = true;
        self
    }
}

/// Content of one grid position
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Particle),
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn particle(&self) -> Option<&Particle> {
        match self {
            Cell::Occupied(p) => Some(p),
            Cell::Empty => None,
        }
    }

    #[inline]
    pub fn particle_mut(&mut self) -> Option<&mut Particle> {
        match self {
            Cell::Occupied(p) => Some(p),
            Cell::Empty => None,
        }
    }

    /// Empty space counts as the darkest possible neighbor
    #[inline]
    pub fn brightness(&self) -> f32 {
        match self {
            Cell::Occupied(p) => p.brightness,
            Cell::Empty => 0.0,
        }
    }
}

impl From<Particle> for Cell {
    fn from(p: Particle) -> Self {
        Cell::Occupied(p)
    }
}

#[inline]
pub fn brightness_of(r: u8, g: u8, b: u8) -> f32 {
    (r as f32 + g as f32 + b as f32) / 3.0
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub fn unpack_rgb(color: u32) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_and_unpacks_rgb() {
        let c = pack_rgb(0x12, 0xAB, 0xFF);
        assert_eq!(c, 0x12ABFF);
        assert_eq!(unpack_rgb(c), (0x12, 0xAB, 0xFF));
    }

    #[test]
    fn particle_derives_brightness_and_density() {
        let p = Particle::from_rgb(255, 255, 255, FallCategory::FastDown);
        assert_eq!(p.brightness, 255.0);
        assert_eq!(p.density, 0.0);
        assert!(p.can_fall);
        assert!(!p.revealed);

        let black = Particle::from_rgb(0, 0, 0, FallCategory::None);
        assert_eq!(black.density, 1.0);
        assert!(!black.can_fall);
    }

    #[test]
    fn empty_cell_is_darkest() {
        assert_eq!(Cell::Empty.brightness(), 0.0);
        let cell: Cell = Particle::with_brightness(40, FallCategory::None).into();
        assert_eq!(cell.brightness(), 40.0);
    }
}
