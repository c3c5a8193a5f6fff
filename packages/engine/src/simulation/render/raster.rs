//! CPU rasterizer for frames and the PNG still export

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::particle::unpack_rgb;
use crate::systems::cache::VisiblePixel;

/// Largest RGBA buffer a render or export may allocate
pub(super) const MAX_RASTER_BYTES: u64 = 1 << 30;

/// Square drawn inside each cell: (offset, side) in output pixels
fn square_extent(cell_size: u32, border: f32, scale: u32) -> (u32, u32) {
    let cell_px = cell_size * scale;
    let side = ((cell_size as f32 * border * scale as f32).round() as u32).clamp(1, cell_px);
    let offset = ((cell_size as f32 * (1.0 - border) / 2.0 * scale as f32).round() as u32).min(cell_px - side);
    (offset, side)
}

/// Output dimensions for a `cols x rows` grid, or an error when the RGBA
/// buffer would overflow or exceed `MAX_RASTER_BYTES`
pub(super) fn canvas_size(cols: u32, rows: u32, cell_size: u32, scale: u32) -> Result<(u32, u32), String> {
    let too_large = || format!("{cols}x{rows} cells at {cell_size}px x{scale} is too large to render");
    let cell_px = cell_size.max(1).checked_mul(scale.max(1)).ok_or_else(too_large)?;
    let width = cols.checked_mul(cell_px).ok_or_else(too_large)?;
    let height = rows.checked_mul(cell_px).ok_or_else(too_large)?;
    let bytes = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(too_large)?;
    if bytes > MAX_RASTER_BYTES {
        return Err(too_large());
    }
    Ok((width, height))
}

/// Draw `pixels` on black: one `cell_size * scale` cell per grid cell with a
/// centered square of `border` relative size.
pub(super) fn rasterize(
    pixels: &[VisiblePixel],
    cols: u32,
    rows: u32,
    cell_size: u32,
    border: f32,
    scale: u32,
) -> Result<RgbaImage, String> {
    let (width, height) = canvas_size(cols, rows, cell_size, scale)?;
    let cell_px = cell_size.max(1) * scale.max(1);
    let (offset, side) = square_extent(cell_size.max(1), border, scale.max(1));

    // Last write wins, like painting onto a canvas
    let mut colors: Vec<Option<u32>> = vec![None; (cols as usize) * (rows as usize)];
    for px in pixels {
        if px.col < cols && px.row < rows {
            colors[(px.row as usize) * (cols as usize) + px.col as usize] = Some(px.color);
        }
    }

    let mut image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    let row_bytes = (width as usize) * 4;
    if row_bytes == 0 {
        return Ok(image);
    }

    let paint_row = |y: usize, line: &mut [u8]| {
        let y = y as u32;
        let within = y % cell_px;
        if within < offset || within >= offset + side {
            return;
        }
        let row = (y / cell_px) as usize;
        for col in 0..cols {
            let Some(color) = colors[row * (cols as usize) + col as usize] else {
                continue;
            };
            let (r, g, b) = unpack_rgb(color);
            let x0 = (col * cell_px + offset) as usize;
            for x in x0..x0 + side as usize {
                line[x * 4..x * 4 + 4].copy_from_slice(&[r, g, b, 255]);
            }
        }
    };

    #[cfg(feature = "parallel")]
    {
        image
            .par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(y, line)| paint_row(y, line));
    }
    #[cfg(not(feature = "parallel"))]
    {
        image
            .chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(y, line)| paint_row(y, line));
    }

    Ok(image)
}

pub(super) fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;
    Ok(bytes)
}
