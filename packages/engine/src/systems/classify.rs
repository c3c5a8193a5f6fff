//! Particle classification by brightness percentile
//!
//! Every cell becomes a particle. The brightest `top_threshold` fraction can
//! fall fast (or rise, with `upward_chance`), the next band down to
//! `middle_threshold` falls slowly, and everything darker never moves.

use image::RgbaImage;

use crate::core::grid::GridStore;
use crate::core::random::RandomSource;
use crate::domain::particle::brightness_of;
use crate::domain::{Cell, FallCategory, Particle, SandConfig};

/// Brightness cut points derived from the sorted brightness distribution
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub top: f32,
    pub middle: f32,
}

impl Thresholds {
    /// `sorted_desc` must be sorted brightest first.
    ///
    /// A fraction `f` selects the brightness of the `floor(f * n)`-th
    /// brightest cell (at least the first), so exactly that many cells are at
    /// or above the cut unless ties extend it.
    pub fn from_sorted(sorted_desc: &[f32], top_fraction: f32, middle_fraction: f32) -> Self {
        Self {
            top: cut_point(sorted_desc, top_fraction),
            middle: cut_point(sorted_desc, middle_fraction),
        }
    }

    pub fn from_brightness(values: &[f32], top_fraction: f32, middle_fraction: f32) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| b.total_cmp(a));
        Self::from_sorted(&sorted, top_fraction, middle_fraction)
    }
}

fn cut_point(sorted_desc: &[f32], fraction: f32) -> f32 {
    if sorted_desc.is_empty() {
        return f32::INFINITY;
    }
    let rank = (fraction * sorted_desc.len() as f32).floor() as usize;
    let rank = rank.clamp(1, sorted_desc.len());
    sorted_desc[rank - 1]
}

/// Fall category for one brightness value, in the documented order
pub fn categorize(brightness: f32, thresholds: &Thresholds, upward_chance: f32, rng: &mut dyn RandomSource) -> FallCategory {
    if brightness >= thresholds.top {
        if rng.next_f32() < upward_chance {
            FallCategory::Upward
        } else {
            FallCategory::FastDown
        }
    } else if brightness >= thresholds.middle {
        FallCategory::SlowDown
    } else {
        FallCategory::None
    }
}

/// Tally of the categories handed out during population
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassificationSummary {
    pub none: usize,
    pub slow_down: usize,
    pub fast_down: usize,
    pub upward: usize,
}

impl ClassificationSummary {
    fn count(&mut self, category: FallCategory) {
        match category {
            FallCategory::None => self.none += 1,
            FallCategory::SlowDown => self.slow_down += 1,
            FallCategory::FastDown => self.fast_down += 1,
            FallCategory::Upward => self.upward += 1,
        }
    }

    pub fn falling(&self) -> usize {
        self.slow_down + self.fast_down + self.upward
    }
}

/// Build a fully populated grid from a prepared (resized, dithered) image
pub fn populate_grid(
    image: &RgbaImage,
    config: &SandConfig,
    rng: &mut dyn RandomSource,
) -> (GridStore, ClassificationSummary) {
    let (cols, rows) = image.dimensions();
    let brightness: Vec<f32> = image
        .pixels()
        .map(|px| brightness_of(px[0], px[1], px[2]))
        .collect();
    let thresholds = Thresholds::from_brightness(&brightness, config.top_threshold, config.middle_threshold);

    let mut grid = GridStore::new(cols, rows);
    let mut summary = ClassificationSummary::default();

    // Column-major so random draws follow the same order on every run
    for col in 0..cols {
        for row in 0..rows {
            let px = image.get_pixel(col, row);
            let b = brightness[(row as usize) * (cols as usize) + col as usize];
            let category = categorize(b, &thresholds, config.upward_chance, rng);
            summary.count(category);
            let particle = Particle::from_rgb(px[0], px[1], px[2], category);
            grid.set(col, row, Cell::Occupied(particle), 0);
        }
    }

    sand_log!(
        "classified {}x{} cells: {} fast, {} upward, {} slow, {} static (cuts {:.1} / {:.1})",
        cols,
        rows,
        summary.fast_down,
        summary.upward,
        summary.slow_down,
        summary.none,
        thresholds.top,
        thresholds.middle
    );

    (grid, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{SequenceSource, Xorshift32};
    use image::Rgba;

    #[test]
    fn cut_point_ranks_from_the_top() {
        let sorted = [250.0, 130.0, 10.0, 5.0];
        assert_eq!(cut_point(&sorted, 0.25), 250.0);
        assert_eq!(cut_point(&sorted, 0.5), 130.0);
        // tiny fractions still select the brightest cell
        assert_eq!(cut_point(&sorted, 0.01), 250.0);
        assert_eq!(cut_point(&sorted, 1.0), 5.0);
    }

    #[test]
    fn categorize_respects_upward_roll() {
        let t = Thresholds { top: 200.0, middle: 100.0 };
        // next_f32 of 0 is 0.0 < 0.5 -> upward
        let mut low = SequenceSource::new(vec![0]);
        assert_eq!(categorize(220.0, &t, 0.5, &mut low), FallCategory::Upward);
        let mut high = SequenceSource::new(vec![u32::MAX]);
        assert_eq!(categorize(220.0, &t, 0.5, &mut high), FallCategory::FastDown);
        assert_eq!(categorize(150.0, &t, 0.5, &mut high), FallCategory::SlowDown);
        assert_eq!(categorize(99.0, &t, 0.5, &mut high), FallCategory::None);
    }

    #[test]
    fn every_pixel_becomes_a_particle() {
        let img = RgbaImage::from_fn(6, 4, |x, y| {
            let v = (x * 40 + y * 3) as u8;
            Rgba([v, v, v, 255])
        });
        let mut rng = Xorshift32::new(1);
        let (grid, summary) = populate_grid(&img, &SandConfig::default(), &mut rng);
        assert_eq!(grid.particle_count(), 24);
        assert_eq!(summary.none + summary.falling(), 24);
        assert!(grid.fall_distances().iter().all(|&d| d == 0));
        assert!(grid.cells().iter().filter_map(Cell::particle).all(|p| !p.revealed));
    }

    #[test]
    fn zero_upward_chance_never_rises() {
        let img = RgbaImage::from_fn(10, 10, |x, _| Rgba([(x * 25) as u8, 0, 0, 255]));
        let config = SandConfig { upward_chance: 0.0, ..SandConfig::default() };
        let mut rng = Xorshift32::new(3);
        let (_, summary) = populate_grid(&img, &config, &mut rng);
        assert_eq!(summary.upward, 0);
        assert!(summary.fast_down > 0);
    }
}
