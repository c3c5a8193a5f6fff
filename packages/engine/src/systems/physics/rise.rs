//! Upward movement for embers (Upward category)

use crate::core::grid::GridStore;
use crate::core::random::RandomSource;
use crate::domain::{Cell, Particle};

/// Where an upward particle goes this tick.
///
/// Straight up into empty space, or into an occupied cell whose occupant is
/// strictly darker (the caller swaps them). Otherwise one of the two upward
/// diagonals, only into empty space; the first direction is drawn from `rng`
/// and the other is tried second.
pub fn find_rise_target(
    grid: &GridStore,
    col: u32,
    row: u32,
    particle: &Particle,
    rng: &mut dyn RandomSource,
) -> Option<usize> {
    let up = grid.neighbor(col, row, 0, -1)?;

    if grid.can_receive(up) {
        match grid.cell_at(up) {
            Cell::Empty => return Some(up),
            Cell::Occupied(above) if particle.brightness > above.brightness => return Some(up),
            Cell::Occupied(_) => {}
        }
    }

    let dir = rng.next_sign();
    [dir, -dir].into_iter().find_map(|dc| {
        grid.neighbor(col, row, dc, -1)
            .filter(|&dst| grid.cell_at(dst).is_empty() && grid.can_receive(dst))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SequenceSource;
    use crate::domain::FallCategory;

    #[test]
    fn top_row_cannot_rise() {
        let grid = GridStore::new(3, 2);
        let p = Particle::with_brightness(255, FallCategory::Upward);
        let mut rng = SequenceSource::new(vec![0]);
        assert_eq!(find_rise_target(&grid, 1, 0, &p, &mut rng), None);
    }

    #[test]
    fn diagonals_require_empty_cells() {
        let mut grid = GridStore::new(3, 2);
        let p = Particle::with_brightness(100, FallCategory::Upward);
        for col in 0..3 {
            grid.set(col, 0, Particle::with_brightness(10, FallCategory::None).into(), 0);
        }
        // straight up is darker, so it wins
        let mut rng = SequenceSource::new(vec![0]);
        assert_eq!(find_rise_target(&grid, 1, 1, &p, &mut rng), Some(grid.index(1, 0)));

        let bright = Particle::with_brightness(5, FallCategory::Upward);
        assert_eq!(find_rise_target(&grid, 1, 1, &bright, &mut rng), None);
    }

    #[test]
    fn falls_back_to_second_diagonal() {
        let mut grid = GridStore::new(3, 2);
        let p = Particle::with_brightness(100, FallCategory::Upward);
        grid.set(1, 0, Particle::with_brightness(200, FallCategory::None).into(), 0);
        grid.set(0, 0, Particle::with_brightness(200, FallCategory::None).into(), 0);
        // left first, left blocked -> right
        let mut rng = SequenceSource::new(vec![0]);
        assert_eq!(find_rise_target(&grid, 1, 1, &p, &mut rng), Some(grid.index(2, 0)));
    }
}
