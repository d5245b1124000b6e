use crate::error::OcrError;
use image::{GrayImage, Luma};

/// Fixed binarization boundary on the 0-255 scale
pub const THRESHOLD: u8 = 100;

/// Global binary threshold
/// Pixels above the boundary become 255, everything else 0
pub fn apply(gray: &GrayImage) -> Result<GrayImage, OcrError> {
    Ok(binarize(gray, THRESHOLD))
}

fn binarize(img: &GrayImage, boundary: u8) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        if img.get_pixel(x, y).0[0] > boundary {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}
