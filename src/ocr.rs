//! Text extraction: decode, preprocess, recognize
//!
//! `load_image` is the caller-side decode step. `extract_text` is the
//! pipeline proper and expects an already decoded image.

use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::preprocessing::Pipeline;
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;

/// Decode an image file
pub fn load_image(path: &Path) -> Result<DynamicImage, OcrError> {
    let image = image::open(path).map_err(|source| OcrError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image)
}

/// Preprocess `image` and hand it to `engine`
///
/// The text is returned exactly as the engine produced it, so an empty
/// string means "no text found" rather than a failure.
pub fn extract_text(image: &DynamicImage, engine: &dyn OcrEngine) -> Result<String, OcrError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(OcrError::EmptyImage { width, height });
    }

    let preprocessed = Pipeline::new().process(image)?;

    let text = engine.recognize(&preprocessed.image)?;

    tracing::info!(
        "{} recognized {} chars (preprocessing {}ms)",
        engine.name(),
        text.chars().count(),
        preprocessed.total_time_ms
    );

    Ok(text)
}

/// Decode the file at `path`, then run `extract_text` on it
pub fn extract_text_from_path(path: &Path, engine: &dyn OcrEngine) -> Result<String, OcrError> {
    let image = load_image(path)?;
    extract_text(&image, engine)
}

/// Run `extract_text` on tokio's blocking pool
///
/// The caller's task stays free while Tesseract works; the result arrives
/// when the returned future completes.
pub async fn extract_text_async(
    image: DynamicImage,
    engine: Arc<dyn OcrEngine>,
) -> Result<String, OcrError> {
    run_blocking(move || extract_text(&image, engine.as_ref())).await
}

/// Like `extract_text_async`, decoding `path` on the blocking pool too
pub async fn extract_text_from_path_async(
    path: &Path,
    engine: Arc<dyn OcrEngine>,
) -> Result<String, OcrError> {
    let path = path.to_path_buf();
    run_blocking(move || extract_text_from_path(&path, engine.as_ref())).await
}

async fn run_blocking<F>(job: F) -> Result<String, OcrError>
where
    F: FnOnce() -> Result<String, OcrError> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| OcrError::Internal(format!("OCR task failed: {}", e)))?
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Engine double that records what it was asked to read
    pub(crate) struct RecordingEngine {
        pub seen: Mutex<Vec<GrayImage>>,
        pub reply: String,
    }

    impl RecordingEngine {
        pub fn replying(reply: &str) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                reply: reply.to_string(),
            }
        }

        pub fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    impl OcrEngine for RecordingEngine {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn check(&self) -> Result<(), OcrError> {
            Ok(())
        }

        fn recognize(&self, image: &GrayImage) -> Result<String, OcrError> {
            self.seen.lock().unwrap().push(image.clone());
            Ok(self.reply.clone())
        }
    }

    struct BrokenEngine;

    impl OcrEngine for BrokenEngine {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn check(&self) -> Result<(), OcrError> {
            Err(OcrError::EngineUnavailable("tesseract not found".to_string()))
        }

        fn recognize(&self, _image: &GrayImage) -> Result<String, OcrError> {
            Err(OcrError::Recognition("engine crashed".to_string()))
        }
    }

    fn page() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(30, 12, |x, _| {
            if x % 4 == 0 {
                Rgb([20, 30, 40])
            } else {
                Rgb([230, 220, 210])
            }
        }))
    }

    #[test]
    fn test_extract_text_hands_binary_image_to_engine() {
        let engine = RecordingEngine::replying("hello\n");

        let text = extract_text(&page(), &engine).unwrap();

        assert_eq!(text, "hello\n");
        let seen = engine.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].dimensions(), (30, 12));
        assert!(seen[0].pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_extract_text_is_deterministic() {
        let engine = RecordingEngine::replying("same");
        let img = page();

        let first = extract_text(&img, &engine).unwrap();
        let second = extract_text(&img, &engine).unwrap();

        assert_eq!(first, second);
        let seen = engine.seen.lock().unwrap();
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn test_empty_text_is_a_success() {
        let engine = RecordingEngine::replying("");
        let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(20, 20, Luma([255])));

        let text = extract_text(&blank, &engine).unwrap();

        assert!(text.is_empty());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_recognized_length_is_counted_in_chars() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();
        let engine = RecordingEngine::replying("héllo wörld");

        let text = tracing::subscriber::with_default(subscriber, || extract_text(&page(), &engine))
            .unwrap();

        assert_eq!(text, "héllo wörld");
        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("recognized 11 chars"), "logs: {}", logs);
    }

    #[test]
    fn test_zero_dimension_image_is_rejected_before_engine() {
        let engine = RecordingEngine::replying("never");
        let empty = DynamicImage::ImageLuma8(GrayImage::new(0, 5));

        let err = extract_text(&empty, &engine).unwrap_err();

        assert!(matches!(err, OcrError::EmptyImage { width: 0, height: 5 }));
        assert_eq!(engine.calls(), 0);
    }

    #[test]
    fn test_engine_failure_propagates() {
        let err = extract_text(&page(), &BrokenEngine).unwrap_err();
        assert_eq!(err.code(), "RECOGNITION_ERROR");
    }

    #[test]
    fn test_missing_file_fails_before_engine() {
        let engine = RecordingEngine::replying("never");
        let path = PathBuf::from("/definitely/not/here.png");

        let err = extract_text_from_path(&path, &engine).unwrap_err();

        assert!(matches!(err, OcrError::ImageLoad { .. }));
        assert_eq!(engine.calls(), 0);
    }

    #[test]
    fn test_extract_text_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        page().save(&path).unwrap();
        let engine = RecordingEngine::replying("from disk");

        let text = extract_text_from_path(&path, &engine).unwrap();

        assert_eq!(text, "from disk");
        assert_eq!(engine.calls(), 1);
    }

    #[tokio::test]
    async fn test_extract_text_async_delivers_result() {
        let engine = Arc::new(RecordingEngine::replying("async"));

        let text = extract_text_async(page(), engine.clone()).await.unwrap();

        assert_eq!(text, "async");
        assert_eq!(engine.calls(), 1);
    }

    #[tokio::test]
    async fn test_extract_text_from_path_async_decodes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.bmp");
        page().save(&path).unwrap();
        let engine = Arc::new(RecordingEngine::replying("bmp"));

        let text = extract_text_from_path_async(&path, engine.clone())
            .await
            .unwrap();

        assert_eq!(text, "bmp");
        assert_eq!(engine.calls(), 1);
    }

    #[tokio::test]
    async fn test_async_errors_arrive_through_the_future() {
        let engine: Arc<dyn OcrEngine> = Arc::new(BrokenEngine);

        let err = extract_text_from_path_async(Path::new("/nope.png"), engine.clone())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "IMAGE_LOAD");

        let err = extract_text_async(page(), engine).await.unwrap_err();
        assert_eq!(err.code(), "RECOGNITION_ERROR");
    }
}
