use crate::error::OcrError;
use image::GrayImage;
use imageproc::filter::separable_filter_equal;

/// Side length of the square Gaussian kernel
// 1x1 reduces the stage to a copy; a 3x3 or 5x5 kernel is the likely intent
pub const KERNEL_SIZE: u32 = 1;

/// Light Gaussian smoothing over the binarized image
pub fn apply(gray: &GrayImage) -> Result<GrayImage, OcrError> {
    let kernel = gaussian_kernel(KERNEL_SIZE)?;
    Ok(separable_filter_equal(gray, &kernel))
}

/// Normalized 1-D Gaussian weights for an odd kernel size
/// Sigma is derived from the size the way OpenCV does when none is given
fn gaussian_kernel(size: u32) -> Result<Vec<f32>, OcrError> {
    if size == 0 || size % 2 == 0 {
        return Err(OcrError::PreprocessingError(format!(
            "Gaussian kernel size must be odd and positive, got {}",
            size
        )));
    }

    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f32;

    let weights: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f32 = weights.iter().sum();

    Ok(weights.into_iter().map(|w| w / total).collect())
}
