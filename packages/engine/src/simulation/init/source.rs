//! Image sources: encoded bytes, raw buffers, and the placeholder gradient

use image::{DynamicImage, ImageBuffer, Rgba, RgbImage, RgbaImage};

pub const PLACEHOLDER_WIDTH: u32 = 400;
pub const PLACEHOLDER_HEIGHT: u32 = 300;

/// Decode PNG or JPEG bytes into RGBA
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, String> {
    let image = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    Ok(image.to_rgba8())
}

/// Wrap a raw pixel buffer. The layout (RGBA or RGB) is inferred from the
/// buffer length.
pub fn image_from_raw(data: &[u8], width: u32, height: u32) -> Result<RgbaImage, String> {
    if width == 0 || height == 0 {
        return Err(format!("image has no pixels ({}x{})", width, height));
    }
    let pixels = (width as usize) * (height as usize);

    if data.len() == pixels * 4 {
        RgbaImage::from_raw(width, height, data.to_vec())
            .ok_or_else(|| "RGBA buffer does not match dimensions".to_string())
    } else if data.len() == pixels * 3 {
        let rgb = RgbImage::from_raw(width, height, data.to_vec())
            .ok_or_else(|| "RGB buffer does not match dimensions".to_string())?;
        Ok(DynamicImage::ImageRgb8(rgb).to_rgba8())
    } else {
        Err(format!(
            "buffer of {} bytes is neither RGBA nor RGB for {}x{}",
            data.len(),
            width,
            height
        ))
    }
}

/// Vertical grayscale gradient, white at the top and black at the bottom
pub fn placeholder_image() -> RgbaImage {
    let last_row = PLACEHOLDER_HEIGHT - 1;
    ImageBuffer::from_fn(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, |_, y| {
        let v = 255 - ((y * 255 + last_row / 2) / last_row) as u8;
        Rgba([v, v, v, 255])
    })
}

pub(super) fn or_placeholder(result: Result<RgbaImage, String>) -> RgbaImage {
    match result {
        Ok(image) if image.width() > 0 && image.height() > 0 => image,
        Ok(_) => {
            sand_warn!("image is empty, using placeholder");
            placeholder_image()
        }
        Err(e) => {
            sand_warn!("image load failed ({}), using placeholder", e);
            placeholder_image()
        }
    }
}
