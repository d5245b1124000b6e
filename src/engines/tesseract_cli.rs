//! Tesseract through its command-line executable
//!
//! Each recognition writes the preprocessed page to a temporary PNG and runs
//! `tesseract <png> stdout --oem 3 --psm 6 -l eng` via rusty-tesseract.
//! Requires `tesseract` and its `eng` traineddata on the system.

use crate::config::Config;
use crate::engine::{OcrEngine, ENGINE_MODE, LANGUAGE, PAGE_SEG_MODE};
use crate::error::OcrError;
use image::{GrayImage, ImageFormat};
use rusty_tesseract::{Args, Image, TessError};
use std::collections::HashMap;

/// Environment variable the `tesseract` executable reads its tessdata directory from
pub const TESSDATA_ENV: &str = "TESSDATA_PREFIX";

/// Tesseract OCR Engine (external process)
pub struct CliTesseractEngine {
    args: Args,
}

impl CliTesseractEngine {
    /// The tessdata directory reaches the child through the environment,
    /// see `engines::export_tessdata_dir`
    pub fn new(config: &Config) -> Self {
        match &config.tessdata_path {
            Some(dir) => tracing::info!("tesseract executable (tessdata: {})", dir.display()),
            None => tracing::info!("tesseract executable (default tessdata)"),
        }

        Self { args: fixed_args() }
    }
}

fn fixed_args() -> Args {
    Args {
        lang: LANGUAGE.to_string(),
        config_variables: HashMap::new(),
        dpi: None,
        psm: Some(PAGE_SEG_MODE.value()),
        oem: Some(ENGINE_MODE.value()),
    }
}

fn map_tess_error(err: TessError) -> OcrError {
    match err {
        TessError::TesseractNotFoundError => {
            OcrError::EngineUnavailable("tesseract executable not found on PATH".to_string())
        }
        other => OcrError::Recognition(other.to_string()),
    }
}

impl OcrEngine for CliTesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract-cli"
    }

    fn check(&self) -> Result<(), OcrError> {
        let version = rusty_tesseract::get_tesseract_version().map_err(|e| match e {
            TessError::TesseractNotFoundError => map_tess_error(e),
            other => OcrError::EngineUnavailable(other.to_string()),
        })?;
        tracing::info!("Using {}", version.lines().next().unwrap_or("tesseract"));
        Ok(())
    }

    fn recognize(&self, image: &GrayImage) -> Result<String, OcrError> {
        let mut page = tempfile::Builder::new()
            .prefix("ocr-desktop-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Internal(format!("Failed to create temp file: {}", e)))?;

        image
            .write_to(page.as_file_mut(), ImageFormat::Png)
            .map_err(|e| OcrError::Internal(format!("Failed to write temp file: {}", e)))?;

        tracing::debug!(
            "Running tesseract on {}x{} page at {}",
            image.width(),
            image.height(),
            page.path().display()
        );

        let input = Image::from_path(page.path()).map_err(map_tess_error)?;
        rusty_tesseract::image_to_string(&input, &self.args).map_err(map_tess_error)
    }
}
