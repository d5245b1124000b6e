use crate::error::OcrError;
use image::{GrayImage, Luma};

/// Normalize contrast with linear min-max stretching
/// The darkest observed value maps to 0, the brightest to 255
pub fn apply(gray: &GrayImage) -> Result<GrayImage, OcrError> {
    let (min_val, max_val) = find_min_max(gray);

    // Constant image: nothing to stretch
    if max_val <= min_val {
        return Ok(gray.clone());
    }

    let scale = 255.0 / (max_val - min_val) as f32;
    let normalized = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let pixel = gray.get_pixel(x, y).0[0];
        let stretched = ((pixel - min_val) as f32 * scale).round();
        Luma([stretched.clamp(0.0, 255.0) as u8])
    });

    Ok(normalized)
}

pub(crate) fn find_min_max(img: &GrayImage) -> (u8, u8) {
    let mut min = 255u8;
    let mut max = 0u8;

    for pixel in img.pixels() {
        let val = pixel.0[0];
        min = min.min(val);
        max = max.max(val);
    }

    (min, max)
}
