use crate::core::grid::GridStore;
use crate::domain::Particle;
use crate::systems::cache::VisiblePixel;

/// A particle is drawn once revealed, or earlier if it already started falling
#[inline]
pub fn should_show(particle: &Particle, fall_distance: u32) -> bool {
    particle.revealed || (particle.can_fall && fall_distance > 0)
}

/// Visible particles of the active grid, column-major
pub(super) fn visible_pixels(grid: &GridStore) -> Vec<VisiblePixel> {
    let mut pixels = Vec::with_capacity(grid.particle_count());
    for col in 0..grid.cols() {
        for row in 0..grid.rows() {
            let idx = grid.index(col, row);
            if let Some(p) = grid.cell_at(idx).particle() {
                if should_show(p, grid.fall_distance_at(idx)) {
                    pixels.push(VisiblePixel { col, row, color: p.color });
                }
            }
        }
    }
    pixels
}

pub(super) fn flatten(pixels: &[VisiblePixel]) -> Vec<u32> {
    let mut out = Vec::with_capacity(pixels.len() * 3);
    for px in pixels {
        out.extend_from_slice(&[px.col, px.row, px.color]);
    }
    out
}
