//! RevealScanner - horizontal scan line that exposes the image
//!
//! The line moves one row every `scan_speed` frames, independent of physics
//! speed, so bright particles that were kicked early can outrun it. Reveal is
//! one-way: nothing here ever clears the flag.

use crate::core::grid::GridStore;

/// Fall distance given to a freshly revealed faller so physics picks it up
pub const REVEAL_KICK: u32 = 1;

#[derive(Clone, Debug)]
pub struct RevealScanner {
    enabled: bool,
    scan_line: f32,
}

impl RevealScanner {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, scan_line: 0.0 }
    }

    #[inline]
    pub fn scan_line(&self) -> f32 {
        self.scan_line
    }

    pub fn is_complete(&self, rows: u32) -> bool {
        self.scan_line >= rows as f32
    }

    /// First-frame hook. With scanning disabled everything is revealed at
    /// once and the line parks at the bottom.
    pub fn start(&mut self, grid: &mut GridStore) -> usize {
        if self.enabled {
            return 0;
        }
        let rows = grid.rows();
        self.scan_line = rows as f32;
        reveal_rows(grid, rows)
    }

    /// Per-frame update: maybe advance the line, then reveal everything above
    /// it. Returns the number of newly revealed particles.
    pub fn advance(&mut self, grid: &mut GridStore, frame: u64, scan_speed: u32) -> usize {
        if !self.enabled {
            return 0;
        }
        let rows = grid.rows() as f32;
        if frame % scan_speed.max(1) as u64 == 0 && self.scan_line < rows {
            self.scan_line = (self.scan_line + 1.0).min(rows);
        }
        let max_row = (self.scan_line.floor() as u32).min(grid.rows());
        reveal_rows(grid, max_row)
    }
}

/// Reveal every particle in rows `0..max_row`
pub fn reveal_rows(grid: &mut GridStore, max_row: u32) -> usize {
    let cols = grid.cols() as usize;
    let end = (max_row as usize) * cols;
    let mut revealed = 0;
    for idx in 0..end.min(grid.size()) {
        let (cell, distance) = grid.active_slot_mut(idx);
        if let Some(p) = cell.particle_mut() {
            if !p.revealed {
                p.revealed = true;
                if p.can_fall && *distance == 0 {
                    *distance = REVEAL_KICK;
                }
                revealed += 1;
            }
        }
    }
    revealed
}
