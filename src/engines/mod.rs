//! Tesseract linkages
//!
//! The same engine, reached either through the `tesseract` executable or
//! linked in-process. Which one is built is decided by feature flags.

#[cfg(feature = "tesseract-cli")]
pub mod tesseract_cli;

#[cfg(feature = "tesseract-static")]
pub mod tesseract_static;

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::OcrError;
use std::sync::Arc;

/// Build the Tesseract engine this binary was compiled with
#[cfg(feature = "tesseract-static")]
pub fn create_engine(config: &Config) -> Result<Arc<dyn OcrEngine>, OcrError> {
    tracing::info!("Initializing statically linked Tesseract...");
    Ok(Arc::new(tesseract_static::StaticTesseractEngine::new(config)?))
}

/// Build the Tesseract engine this binary was compiled with
#[cfg(all(feature = "tesseract-cli", not(feature = "tesseract-static")))]
pub fn create_engine(config: &Config) -> Result<Arc<dyn OcrEngine>, OcrError> {
    tracing::info!("Initializing Tesseract command-line engine...");
    Ok(Arc::new(tesseract_cli::CliTesseractEngine::new(config)))
}

/// Hand the tessdata directory to the `tesseract` child processes
///
/// Writes the process environment, so call it before any thread is spawned.
#[cfg(all(feature = "tesseract-cli", not(feature = "tesseract-static")))]
pub fn export_tessdata_dir(config: &Config) {
    if let Some(dir) = &config.tessdata_path {
        tracing::debug!("{}={}", tesseract_cli::TESSDATA_ENV, dir.display());
        std::env::set_var(tesseract_cli::TESSDATA_ENV, dir);
    }
}

/// The in-process linkage takes the directory from `Config` directly
#[cfg(not(all(feature = "tesseract-cli", not(feature = "tesseract-static"))))]
pub fn export_tessdata_dir(_config: &Config) {}

#[cfg(not(any(feature = "tesseract-cli", feature = "tesseract-static")))]
pub fn create_engine(_config: &Config) -> Result<Arc<dyn OcrEngine>, OcrError> {
    Err(OcrError::EngineUnavailable(
        "No OCR engine compiled in. Build with --features tesseract-cli or --features tesseract-static"
            .to_string(),
    ))
}
