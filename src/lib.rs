//! Extract text from an image with a fixed cleanup pipeline and Tesseract.
//!
//! The pipeline converts to grayscale, stretches contrast to the full
//! 0-255 range, binarizes at 100, applies a 1x1 Gaussian blur and hands the
//! result to Tesseract (OEM 3, PSM 6). Front ends call
//! [`extract_text_from_path`] or, when they must stay responsive,
//! [`extract_text_async`].

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod ocr;
pub mod preprocessing;
pub mod session;

pub use engine::OcrEngine;
pub use error::OcrError;
pub use ocr::{
    extract_text, extract_text_async, extract_text_from_path, extract_text_from_path_async,
    load_image,
};
