//! Physics - one double-buffered tick of the falling sand
//!
//! The active grid is read-only for the whole tick; every particle lands in
//! the staging grid exactly once (carried, kept, moved, or swapped back) and
//! the buffers flip at the end.
//!
//! CRITICAL: processing order matters.
//! - Columns go left to right.
//! - Inside a column, downward fallers go bottom-to-top so a particle never
//!   moves twice and gravity propagates within one pass.
//! - Upward particles go top-to-bottom afterwards, the mirror image.

mod fall;
mod rise;

pub use fall::find_fall_target;
pub use rise::find_rise_target;

use crate::core::grid::GridStore;
use crate::core::random::RandomSource;
use crate::domain::{Cell, Particle, SandConfig};

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhysicsOutcome {
    pub moved: u32,
    /// Moves that relocated the destination's occupant into the source
    pub swapped: u32,
    /// Eligible particles that found nowhere to go
    pub stayed: u32,
    /// Dormant particles after the tick
    pub dormant: u32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Down,
    Up,
}

/// Static particles are carried through untouched: they cannot fall, have
/// not been revealed or kicked yet, or went dormant.
#[inline]
pub fn is_static(particle: &Particle, fall_distance: u32, config: &SandConfig) -> bool {
    !particle.can_fall
        || (!particle.revealed && fall_distance == 0)
        || (config.dormancy && particle.dormant)
}

/// Run one physics tick and commit it
pub fn step_physics(grid: &mut GridStore, config: &SandConfig, rng: &mut dyn RandomSource) -> PhysicsOutcome {
    grid.clear_staging();

    for idx in 0..grid.size() {
        if let Cell::Occupied(p) = *grid.cell_at(idx) {
            if is_static(&p, grid.fall_distance_at(idx), config) {
                grid.keep(idx);
            }
        }
    }

    let mut outcome = PhysicsOutcome::default();
    let rows = grid.rows();
    for col in 0..grid.cols() {
        for row in (0..rows).rev() {
            update_cell(grid, config, rng, col, row, Sweep::Down, &mut outcome);
        }
        for row in 0..rows {
            update_cell(grid, config, rng, col, row, Sweep::Up, &mut outcome);
        }
    }

    grid.commit();

    outcome.dormant = grid
        .cells()
        .iter()
        .filter_map(Cell::particle)
        .filter(|p| p.dormant)
        .count() as u32;
    outcome
}

fn update_cell(
    grid: &mut GridStore,
    config: &SandConfig,
    rng: &mut dyn RandomSource,
    col: u32,
    row: u32,
    sweep: Sweep,
    outcome: &mut PhysicsOutcome,
) {
    let idx = grid.index(col, row);
    // Carried, already moved, or displaced by an earlier mover
    if grid.is_placed(idx) {
        return;
    }
    let Cell::Occupied(mut particle) = *grid.cell_at(idx) else {
        return;
    };
    if particle.fall_category.is_upward() != (sweep == Sweep::Up) {
        return;
    }

    let distance = grid.fall_distance_at(idx);
    let target = if distance < config.max_fall_distance {
        match sweep {
            Sweep::Up => find_rise_target(grid, col, row, &particle, rng),
            Sweep::Down => find_fall_target(grid, col, row, &particle),
        }
    } else {
        None
    };

    match target {
        Some(dst) => {
            particle.dormant = false;
            particle.dormant_frames = 0;
            if grid.relocate(idx, dst, particle, distance + 1) {
                outcome.swapped += 1;
            }
            outcome.moved += 1;
        }
        None => {
            particle.dormant_frames = particle.dormant_frames.saturating_add(1);
            if config.dormancy && particle.dormant_frames > config.dormant_after {
                particle.dormant = true;
            }
            grid.keep_as(idx, particle, distance);
            outcome.stayed += 1;
        }
    }
}
