use crate::error::OcrError;
use image::{DynamicImage, GrayImage};

/// Reduce any decoded image to one 8-bit intensity channel
/// Uses the image crate's luma weighting; alpha is dropped
pub fn apply(image: &DynamicImage) -> Result<GrayImage, OcrError> {
    Ok(image.to_luma8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, Rgb, RgbImage};

    #[test]
    fn test_grayscale_weights_channels_by_luma() {
        let mut img = RgbImage::new(10, 10);
        img.put_pixel(0, 0, Rgb([255, 0, 0])); // Red
        img.put_pixel(1, 0, Rgb([0, 255, 0])); // Green
        img.put_pixel(2, 0, Rgb([0, 0, 255])); // Blue

        let gray = apply(&DynamicImage::ImageRgb8(img)).unwrap();

        let red = gray.get_pixel(0, 0).0[0];
        let green = gray.get_pixel(1, 0).0[0];
        let blue = gray.get_pixel(2, 0).0[0];
        assert!(red > 0 && green > 0 && blue > 0);
        // Green dominates every luma formula, blue contributes least
        assert!(green > red);
        assert!(red > blue);
    }

    #[test]
    fn test_grayscale_preserves_dimensions() {
        let img = RgbImage::new(100, 50);
        let gray = apply(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(gray.dimensions(), (100, 50));
    }

    #[test]
    fn test_grayscale_has_single_channel() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let gray = DynamicImage::ImageLuma8(apply(&img).unwrap());
        assert_eq!(gray.color(), ColorType::L8);
        assert_eq!(gray.color().channel_count(), 1);
    }

    #[test]
    fn test_grayscale_leaves_input_untouched() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([10, 200, 30])));
        let before = img.clone();
        let _ = apply(&img).unwrap();
        assert_eq!(img, before);
    }
}
