use crate::error::OcrError;
use image::{DynamicImage, GrayImage};
use std::time::Instant;

use super::steps;

/// Stage names in execution order
pub const STAGES: [&str; 4] = ["grayscale", "normalize", "threshold", "blur"];

/// Timing information for a single preprocessing step
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: &'static str,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone)]
pub struct PreprocessingResult {
    /// Image ready for recognition
    pub image: GrayImage,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Fixed preprocessing pipeline:
/// grayscale, min-max normalize, binarize at 100, 1x1 Gaussian blur
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline;

impl Pipeline {
    pub fn new() -> Self {
        Self
    }

    /// Run every stage in order; the input is never modified
    pub fn process(&self, image: &DynamicImage) -> Result<PreprocessingResult, OcrError> {
        let start = Instant::now();
        let mut timings = Vec::with_capacity(STAGES.len());

        let gray = run_step(STAGES[0], &mut timings, || steps::grayscale::apply(image))?;
        let normalized = run_step(STAGES[1], &mut timings, || steps::normalize::apply(&gray))?;
        let binary = run_step(STAGES[2], &mut timings, || {
            steps::threshold::apply(&normalized)
        })?;
        let blurred = run_step(STAGES[3], &mut timings, || steps::blur::apply(&binary))?;

        let total_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            "Preprocessed {}x{} image in {}ms",
            blurred.width(),
            blurred.height(),
            total_time_ms
        );

        Ok(PreprocessingResult {
            image: blurred,
            total_time_ms,
            steps: timings,
        })
    }
}

fn run_step<F>(
    name: &'static str,
    timings: &mut Vec<StepTiming>,
    step_fn: F,
) -> Result<GrayImage, OcrError>
where
    F: FnOnce() -> Result<GrayImage, OcrError>,
{
    let step_start = Instant::now();
    let result = step_fn()?;
    let time_ms = step_start.elapsed().as_millis() as u64;
    tracing::debug!("step {} took {}ms", name, time_ms);
    timings.push(StepTiming { name, time_ms });
    Ok(result)
}
