//! Staging-buffer writes for a running tick
//!
//! Every active occupant must land in staging exactly once per tick. `placed`
//! tracks that from the active side; `arrived` marks staging cells filled by a
//! move so no second mover can land on them. A staging cell holding a particle
//! that was kept in place can still be entered: the kept particle is swapped
//! back into the mover's source.

use super::*;

impl GridStore {
    /// Whether the active occupant at `idx` already has a staging slot
    #[inline]
    pub fn is_placed(&self, idx: usize) -> bool {
        self.placed[idx]
    }

    /// Whether a mover may still land on `idx` this tick
    #[inline]
    pub fn can_receive(&self, idx: usize) -> bool {
        !self.arrived[idx]
    }

    /// Staging content at `idx`
    #[inline]
    pub fn staged(&self, idx: usize) -> &Cell {
        &self.cells[self.staging()][idx]
    }

    /// Carry the active occupant through unchanged
    pub fn keep(&mut self, idx: usize) {
        if let Cell::Occupied(p) = self.cells[self.active][idx] {
            let distance = self.fall[self.active][idx];
            self.keep_as(idx, p, distance);
        }
    }

    /// Leave the occupant at `idx` in place with updated state
    pub fn keep_as(&mut self, idx: usize, particle: Particle, fall_distance: u32) {
        let staging = self.staging();
        debug_assert!(self.cells[staging][idx].is_empty(), "keep_as: staging slot {idx} taken");
        self.cells[staging][idx] = Cell::Occupied(particle);
        self.fall[staging][idx] = fall_distance;
        self.placed[idx] = true;
    }

    /// Move `mover` from `src` to `dst`.
    ///
    /// Whoever occupied `dst` (kept there this tick, or still waiting in the
    /// active buffer) is relocated into `src` and inherits the destination's
    /// previous fall distance. Having moved, it is no longer stationary: its
    /// dormancy state is cleared. Returns true when such a swap happened.
    pub fn relocate(&mut self, src: usize, dst: usize, mover: Particle, fall_distance: u32) -> bool {
        let staging = self.staging();
        let active = self.active;
        debug_assert!(self.can_receive(dst), "relocate: {dst} already received a mover");
        debug_assert!(self.cells[staging][src].is_empty(), "relocate: source {src} already refilled");

        let displaced = match self.cells[staging][dst] {
            Cell::Occupied(kept) => Some(kept),
            Cell::Empty if !self.placed[dst] => {
                self.placed[dst] = true;
                self.cells[active][dst].particle().copied()
            }
            Cell::Empty => None,
        };

        self.cells[staging][dst] = Cell::Occupied(mover);
        self.fall[staging][dst] = fall_distance;
        self.arrived[dst] = true;
        self.placed[src] = true;

        match displaced {
            Some(mut other) => {
                other.dormant = false;
                other.dormant_frames = 0;
                self.cells[staging][src] = Cell::Occupied(other);
                self.fall[staging][src] = self.fall[active][dst];
                self.arrived[src] = true;
                true
            }
            None => false,
        }
    }
}
