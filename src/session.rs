//! Interactive session state
//!
//! Holds which image the user picked. Nothing else survives between runs:
//! every run decodes the file again and discards the pixels afterwards.

use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::ocr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The image the user opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default)]
pub struct Session {
    selection: Option<Selection>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Select `path` after checking it decodes
    ///
    /// On failure the previous selection stays in place.
    pub fn open(&mut self, path: &Path) -> Result<&Selection, OcrError> {
        let image = ocr::load_image(path)?;
        let selection = Selection {
            path: path.to_path_buf(),
            width: image.width(),
            height: image.height(),
        };
        tracing::info!(
            "Selected {} ({}x{})",
            selection.path.display(),
            selection.width,
            selection.height
        );
        Ok(self.selection.insert(selection))
    }

    /// Extract text from the selected image
    pub async fn run(&self, engine: Arc<dyn OcrEngine>) -> Result<String, OcrError> {
        let selection = self.selection.as_ref().ok_or(OcrError::NoImageSelected)?;
        ocr::extract_text_from_path_async(&selection.path, engine).await
    }
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(PathBuf),
    Run,
    Status,
    Help,
    Quit,
    Empty,
    /// A known verb missing its argument; carries the usage line
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "" => Self::Empty,
            "open" | "upload" if rest.is_empty() => Self::Usage("open <path>"),
            "open" | "upload" => Self::Open(PathBuf::from(rest)),
            "run" | "ocr" => Self::Run,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

pub const HELP: &str = "\
Commands:
  open <path>   select an image (png, jpg, bmp, ...)
  run           extract text from the selected image
  status        show the selected image
  help          show this message
  quit          leave";
