//! GridStore - double-buffered particle arena
//!
//! Two fixed-size cell arrays and two fall-distance arrays live side by side;
//! `active` selects which pair is readable. A physics tick reads the active
//! pair and writes the staging pair, then `commit()` flips the index. Cells
//! never see another cell's already-moved result from the same tick.
//!
//! Storage is row-major (`row * cols + col`) like every other grid in the
//! engine, but the public API speaks (col, row).

use crate::domain::{Cell, Particle};

mod indexing;
mod staging;

#[derive(Clone, Debug)]
pub struct GridStore {
    cols: u32,
    rows: u32,
    size: usize,

    cells: [Vec<Cell>; 2],
    fall: [Vec<u32>; 2],
    active: usize,

    // Per-tick bookkeeping, reset by clear_staging()
    placed: Vec<bool>,  // active index: occupant already written to staging
    arrived: Vec<bool>, // staging index: occupant moved in this tick
}

impl GridStore {
    pub fn new(cols: u32, rows: u32) -> Self {
        let size = (cols as usize) * (rows as usize);
        Self {
            cols,
            rows,
            size,
            cells: [vec![Cell::Empty; size], vec![Cell::Empty; size]],
            fall: [vec![0; size], vec![0; size]],
            active: 0,
            placed: vec![false; size],
            arrived: vec![false; size],
        }
    }

    // === Active buffer reads ===

    #[inline]
    pub fn get(&self, col: u32, row: u32) -> Cell {
        self.cells[self.active][self.index(col, row)]
    }

    #[inline]
    pub fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[self.active][idx]
    }

    #[inline]
    pub fn particle(&self, col: u32, row: u32) -> Option<&Particle> {
        self.cells[self.active][self.index(col, row)].particle()
    }

    #[inline]
    pub fn fall_distance(&self, col: u32, row: u32) -> u32 {
        self.fall[self.active][self.index(col, row)]
    }

    #[inline]
    pub fn fall_distance_at(&self, idx: usize) -> u32 {
        self.fall[self.active][idx]
    }

    /// Active cells in storage order
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells[self.active]
    }

    /// Active fall distances in storage order
    #[inline]
    pub fn fall_distances(&self) -> &[u32] {
        &self.fall[self.active]
    }

    pub fn particle_count(&self) -> usize {
        self.cells().iter().filter(|c| !c.is_empty()).count()
    }

    // === Active buffer writes (initialization and reveal only) ===

    /// Place a cell into the active buffer. Used while populating the grid
    /// and by tests; a running tick must go through the staging API.
    pub fn set(&mut self, col: u32, row: u32, cell: Cell, fall_distance: u32) {
        let idx = self.index(col, row);
        self.cells[self.active][idx] = cell;
        self.fall[self.active][idx] = fall_distance;
    }

    #[inline]
    pub fn particle_mut(&mut self, col: u32, row: u32) -> Option<&mut Particle> {
        let idx = self.index(col, row);
        self.cells[self.active][idx].particle_mut()
    }

    /// Mutable view of one active cell together with its fall distance
    #[inline]
    pub fn active_slot_mut(&mut self, idx: usize) -> (&mut Cell, &mut u32) {
        let active = self.active;
        (&mut self.cells[active][idx], &mut self.fall[active][idx])
    }

    // === Buffer protocol ===

    /// Empty the staging buffer before a tick
    pub fn clear_staging(&mut self) {
        let staging = self.staging();
        self.cells[staging].fill(Cell::Empty);
        self.fall[staging].fill(0);
        self.placed.fill(false);
        self.arrived.fill(false);
    }

    /// Make the staging buffer active (grid and fall distances together)
    pub fn commit(&mut self) {
        debug_assert!(
            self.cells[self.active]
                .iter()
                .enumerate()
                .all(|(idx, c)| c.is_empty() || self.placed[idx]),
            "commit: an active particle was never written to staging"
        );
        self.active ^= 1;
    }

    #[inline]
    fn staging(&self) -> usize {
        self.active ^ 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FallCategory;

    fn gray(b: u8) -> Cell {
        Particle::with_brightness(b, FallCategory::SlowDown).into()
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = GridStore::new(3, 2);
        assert_eq!(grid.size(), 6);
        assert_eq!(grid.particle_count(), 0);
        assert!(grid.get(2, 1).is_empty());
    }

    #[test]
    fn set_and_get_round_trip_in_active_buffer() {
        let mut grid = GridStore::new(4, 4);
        grid.set(1, 2, gray(90), 3);
        assert_eq!(grid.get(1, 2).brightness(), 90.0);
        assert_eq!(grid.fall_distance(1, 2), 3);
        assert!(grid.get(2, 1).is_empty());
    }

    #[test]
    fn staging_writes_are_invisible_until_commit() {
        let mut grid = GridStore::new(1, 2);
        let p = Particle::with_brightness(200, FallCategory::FastDown);
        grid.set(0, 0, p.into(), 1);

        grid.clear_staging();
        let src = grid.index(0, 0);
        let dst = grid.index(0, 1);
        grid.relocate(src, dst, p, 2);

        // reads still come from the active buffer
        assert!(!grid.get(0, 0).is_empty());
        assert!(grid.get(0, 1).is_empty());

        grid.commit();
        assert!(grid.get(0, 0).is_empty());
        assert_eq!(grid.get(0, 1).brightness(), 200.0);
        assert_eq!(grid.fall_distance(0, 1), 2);
    }

    #[test]
    fn clear_staging_drops_stale_contents_from_previous_tick() {
        let mut grid = GridStore::new(2, 1);
        grid.set(0, 0, gray(10), 0);
        grid.clear_staging();
        grid.keep(0);
        grid.commit();

        // the old active buffer (now staging) still holds the previous layout
        grid.clear_staging();
        grid.keep(0);
        grid.commit();
        assert_eq!(grid.particle_count(), 1);
        assert_eq!(grid.get(0, 0).brightness(), 10.0);
    }
}
