use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Preprocessing failed: {0}")]
    PreprocessingError(String),

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Failed to recognize text: {0}")]
    Recognition(String),

    #[error("No image selected; open an image first")]
    NoImageSelected,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OcrError {
    /// Stable identifier printed alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            OcrError::ImageLoad { .. } => "IMAGE_LOAD",
            OcrError::EmptyImage { .. } => "EMPTY_IMAGE",
            OcrError::PreprocessingError(_) => "PREPROCESSING_ERROR",
            OcrError::EngineUnavailable(_) => "ENGINE_UNAVAILABLE",
            OcrError::Recognition(_) => "RECOGNITION_ERROR",
            OcrError::NoImageSelected => "NO_IMAGE_SELECTED",
            OcrError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
