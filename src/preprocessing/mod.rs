//! Image preprocessing ahead of recognition
//!
//! A single fixed pipeline that turns a decoded image into a clean
//! two-valued page for Tesseract.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, PreprocessingResult, StepTiming};
