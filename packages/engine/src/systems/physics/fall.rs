//! Downward movement for SlowDown / FastDown particles

use crate::core::grid::GridStore;
use crate::domain::Particle;

/// Candidate offsets in evaluation order: straight down, down-left, down-right
const FALL_CANDIDATES: [i32; 3] = [0, -1, 1];

/// Darkest reachable cell below `particle`, if any is strictly darker.
///
/// Brightness is read from the active grid (empty = 0). Off-grid cells and
/// cells that already received a mover this tick are excluded. Strict `<`
/// keeps the first candidate on ties.
pub fn find_fall_target(grid: &GridStore, col: u32, row: u32, particle: &Particle) -> Option<usize> {
    let mut best = None;
    let mut best_brightness = particle.brightness;

    for dc in FALL_CANDIDATES {
        let Some(dst) = grid.neighbor(col, row, dc, 1) else {
            continue;
        };
        if !grid.can_receive(dst) {
            continue;
        }
        let brightness = grid.cell_at(dst).brightness();
        if brightness < best_brightness {
            best = Some(dst);
            best_brightness = brightness;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FallCategory;

    #[test]
    fn bottom_row_has_no_target() {
        let grid = GridStore::new(3, 2);
        let p = Particle::with_brightness(255, FallCategory::FastDown);
        assert_eq!(find_fall_target(&grid, 1, 1, &p), None);
    }

    #[test]
    fn black_particle_never_falls_into_empty_space() {
        let grid = GridStore::new(1, 2);
        let p = Particle::with_brightness(0, FallCategory::SlowDown);
        assert_eq!(find_fall_target(&grid, 0, 0, &p), None);
    }

    #[test]
    fn edge_column_only_checks_inner_diagonal() {
        let mut grid = GridStore::new(2, 2);
        let p = Particle::with_brightness(200, FallCategory::FastDown);
        grid.set(0, 1, Particle::with_brightness(150, FallCategory::None).into(), 0);
        grid.set(1, 1, Particle::with_brightness(20, FallCategory::None).into(), 0);
        assert_eq!(find_fall_target(&grid, 0, 0, &p), Some(grid.index(1, 1)));
    }
}
