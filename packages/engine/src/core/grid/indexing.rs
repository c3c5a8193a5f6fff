use super::*;

impl GridStore {
    // === Dimensions ===
    #[inline]
    pub fn cols(&self) -> u32 { self.cols }

    #[inline]
    pub fn rows(&self) -> u32 { self.rows }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, col: u32, row: u32) -> usize {
        debug_assert!(
            col < self.cols && row < self.rows,
            "index: out of bounds ({}, {}) for {}x{} grid",
            col,
            row,
            self.cols,
            self.rows
        );
        (row as usize) * (self.cols as usize) + col as usize
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let col = (idx % self.cols as usize) as u32;
        let row = (idx / self.cols as usize) as u32;
        (col, row)
    }

    // === Bounds checking ===
    #[inline]
    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.cols as i32 && row >= 0 && row < self.rows as i32
    }

    /// Index of the neighbor at (col + dc, row + dr), or None off-grid
    #[inline]
    pub fn neighbor(&self, col: u32, row: u32, dc: i32, dr: i32) -> Option<usize> {
        let c = col as i32 + dc;
        let r = row as i32 + dr;
        if self.in_bounds(c, r) {
            Some(self.index(c as u32, r as u32))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_coords_agree() {
        let grid = GridStore::new(5, 3);
        for row in 0..3 {
            for col in 0..5 {
                let idx = grid.index(col, row);
                assert_eq!(grid.coords(idx), (col, row));
            }
        }
    }

    #[test]
    fn neighbor_excludes_out_of_range() {
        let grid = GridStore::new(3, 3);
        assert_eq!(grid.neighbor(0, 0, -1, 1), None);
        assert_eq!(grid.neighbor(2, 2, 0, 1), None);
        assert_eq!(grid.neighbor(1, 1, 1, 1), Some(grid.index(2, 2)));
    }
}
