use crate::error::OcrError;
use image::GrayImage;

/// Recognition language handed to Tesseract
pub const LANGUAGE: &str = "eng";

/// Tesseract OCR engine mode (`--oem`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    LegacyOnly = 0,
    LstmOnly = 1,
    LegacyAndLstm = 2,
    /// Whatever the installed traineddata supports
    Default = 3,
}

/// Tesseract page segmentation mode (`--psm`), the subset worth naming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSegMode {
    Auto = 3,
    SingleColumn = 4,
    /// A single uniform block of text
    SingleBlock = 6,
    SingleLine = 7,
    SingleWord = 8,
}

impl EngineMode {
    pub fn value(self) -> i32 {
        self as i32
    }
}

impl PageSegMode {
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// The only recognition settings this tool uses
pub const ENGINE_MODE: EngineMode = EngineMode::Default;
pub const PAGE_SEG_MODE: PageSegMode = PageSegMode::SingleBlock;

/// Trait implemented by the Tesseract linkages
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "tesseract-cli")
    fn name(&self) -> &'static str;

    /// Verify the engine can run at all, without recognizing anything
    fn check(&self) -> Result<(), OcrError>;

    /// Recognize text in a preprocessed single-channel image
    ///
    /// Output is returned exactly as the engine produced it.
    fn recognize(&self, image: &GrayImage) -> Result<String, OcrError>;
}
