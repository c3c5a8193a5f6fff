//! Image preprocessing - resize to the grid, then ordered dithering
//!
//! One source pixel becomes one simulation cell, so the image is resized to
//! exactly (cols, rows) first. Dithering runs strictly afterwards; dithering
//! before the resize would blur the pattern away.

use image::imageops::{self, FilterType};
use image::RgbaImage;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::SandConfig;

/// 4x4 Bayer threshold matrix
pub const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// 4-bit color: 16 levels per channel
pub const DITHER_LEVELS: u32 = 16;

/// Grid resolution for an image of `width` x `height` pixels.
///
/// The long side gets `max_dimension / 2^(resolution_scale - 1)` pixels, the
/// short side follows the aspect ratio, and both are divided into cells.
pub fn target_dimensions(width: u32, height: u32, config: &SandConfig) -> (u32, u32) {
    let width = width.max(1) as f32;
    let height = height.max(1) as f32;
    let max_dimension = config.max_dimension as f32 / 2f32.powi(config.resolution_scale as i32 - 1);
    let aspect = width / height;

    let (target_w, target_h) = if width > height {
        (max_dimension, max_dimension / aspect)
    } else {
        (max_dimension * aspect, max_dimension)
    };

    let cell = config.cell_size as f32;
    let cols = (target_w / cell).floor().max(1.0) as u32;
    let rows = (target_h / cell).floor().max(1.0) as u32;
    (cols, rows)
}

/// Resize to exactly (cols, rows) pixels
pub fn resize_to_grid(source: &RgbaImage, cols: u32, rows: u32) -> RgbaImage {
    if source.dimensions() == (cols, rows) {
        return source.clone();
    }
    imageops::resize(source, cols, rows, FilterType::Triangle)
}

/// Quantize one 8-bit channel at pixel (x, y) to 4 bits and back
#[inline]
pub fn dither_channel(value: u8, x: u32, y: u32) -> u8 {
    let levels = DITHER_LEVELS as f32;
    let bayer = BAYER_4X4[(y % 4) as usize][(x % 4) as usize] as f32;
    let threshold = bayer / 16.0 - 0.5;

    let normalized = value as f32 / 255.0 + threshold / levels;
    let level = (normalized * (levels - 1.0)).round().clamp(0.0, levels - 1.0);

    if level == 0.0 {
        0
    } else {
        (level / (levels - 1.0) * 255.0).round() as u8
    }
}

/// Ordered dither over RGB in place; alpha is left alone
pub fn apply_bayer_dither(image: &mut RgbaImage) {
    let width = image.width() as usize;
    if width == 0 {
        return;
    }
    let row_bytes = width * 4;
    let buffer: &mut [u8] = image;

    #[cfg(feature = "parallel")]
    {
        buffer
            .par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| dither_row(row, y as u32));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (y, row) in buffer.chunks_mut(row_bytes).enumerate() {
            dither_row(row, y as u32);
        }
    }
}

fn dither_row(row: &mut [u8], y: u32) {
    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        for channel in px.iter_mut().take(3) {
            *channel = dither_channel(*channel, x as u32, y);
        }
    }
}

/// Full preprocessing pass: grid-sized, dithered copy of `source`
pub fn prepare_image(source: &RgbaImage, config: &SandConfig) -> RgbaImage {
    let (cols, rows) = target_dimensions(source.width(), source.height(), config);
    let mut resized = resize_to_grid(source, cols, rows);
    apply_bayer_dither(&mut resized);
    resized
}
