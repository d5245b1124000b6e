//! Statically linked Tesseract
//!
//! Uses tesseract-static (no system dependencies). The `eng` traineddata is
//! taken from the configured tessdata directory, or downloaded once into the
//! user cache directory.

use crate::config::Config;
use crate::engine::{OcrEngine, LANGUAGE, PAGE_SEG_MODE};
use crate::error::OcrError;
use image::{GrayImage, ImageFormat};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tesseract_static::tesseract::Tesseract;

/// Tesseract OCR Engine (in-process)
pub struct StaticTesseractEngine {
    /// Path to tessdata directory
    tessdata_path: String,
}

impl StaticTesseractEngine {
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let tessdata_dir = match &config.tessdata_path {
            Some(dir) => dir.clone(),
            None => ensure_tessdata_available(LANGUAGE)?,
        };

        let tessdata_path = tessdata_dir
            .to_str()
            .map(|s| s.to_string())
            .ok_or_else(|| OcrError::EngineUnavailable("Invalid tessdata path".to_string()))?;

        tracing::info!(
            "Static Tesseract engine configured (tessdata: {}, language: {})",
            tessdata_path,
            LANGUAGE
        );

        Ok(Self { tessdata_path })
    }

    /// Fresh API handle with the fixed recognition settings applied
    ///
    /// Initialization uses the default engine mode (OEM 3).
    fn session(&self) -> Result<Tesseract, OcrError> {
        let tess = Tesseract::new(Some(&self.tessdata_path), Some(LANGUAGE)).map_err(|e| {
            OcrError::EngineUnavailable(format!("Failed to initialize Tesseract: {}", e))
        })?;

        tess.set_variable("tessedit_pageseg_mode", &PAGE_SEG_MODE.value().to_string())
            .map_err(|e| {
                OcrError::EngineUnavailable(format!("Failed to set page segmentation mode: {}", e))
            })
    }
}

impl OcrEngine for StaticTesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract-static"
    }

    fn check(&self) -> Result<(), OcrError> {
        drop(self.session()?);
        Ok(())
    }

    fn recognize(&self, image: &GrayImage) -> Result<String, OcrError> {
        let (width, height) = image.dimensions();

        // BMP is always readable by the bundled leptonica
        let mut bmp_data = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut bmp_data), ImageFormat::Bmp)
            .map_err(|e| OcrError::Internal(format!("Failed to convert to BMP: {}", e)))?;

        tracing::debug!(
            "Processing image: {}x{}, BMP size: {} bytes",
            width,
            height,
            bmp_data.len()
        );

        let tess = self.session()?.set_image_from_mem(&bmp_data).map_err(|e| {
            OcrError::Recognition(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })?;

        let mut tess = tess.recognize().map_err(|e| OcrError::Recognition(e.to_string()))?;

        tess.get_text()
            .map_err(|e| OcrError::Recognition(format!("Failed to get text: {}", e)))
    }
}

// ============================================================================
// Tessdata download helpers
// ============================================================================

/// Ensure tessdata is available, downloading if needed
fn ensure_tessdata_available(language: &str) -> Result<PathBuf, OcrError> {
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ocr-desktop")
        .join("tessdata");

    std::fs::create_dir_all(&cache_dir).map_err(|e| {
        OcrError::EngineUnavailable(format!("Failed to create tessdata directory: {}", e))
    })?;

    let traineddata_path = cache_dir.join(format!("{}.traineddata", language));

    if !traineddata_path.exists() {
        tracing::info!(
            "Downloading tessdata for '{}' (this may take a moment)...",
            language
        );
        download_file(&tessdata_url(language), &traineddata_path)?;
        tracing::info!("Downloaded tessdata to {:?}", traineddata_path);
    } else {
        tracing::info!("Using cached tessdata from {:?}", cache_dir);
    }

    // Tesseract expects the directory, not the file
    Ok(cache_dir)
}

fn tessdata_url(language: &str) -> String {
    // tessdata_fast: smaller, faster downloads
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}

/// Download a file from URL to path using ureq
/// Writes through a `.part` file so a partial download is never picked up
fn download_file(url: &str, path: &Path) -> Result<(), OcrError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| OcrError::EngineUnavailable(format!("Failed to download tessdata: {}", e)))?;

    let buffer = response
        .into_body()
        .with_config()
        .limit(128 * 1024 * 1024)
        .read_to_vec()
        .map_err(|e| {
            OcrError::EngineUnavailable(format!("Failed to read tessdata response: {}", e))
        })?;

    let partial = path.with_extension("traineddata.part");
    let mut file = File::create(&partial).map_err(|e| {
        OcrError::EngineUnavailable(format!("Failed to create tessdata file: {}", e))
    })?;
    file.write_all(&buffer).map_err(|e| {
        OcrError::EngineUnavailable(format!("Failed to write tessdata file: {}", e))
    })?;
    std::fs::rename(&partial, path).map_err(|e| {
        OcrError::EngineUnavailable(format!("Failed to move tessdata into place: {}", e))
    })?;

    Ok(())
}
