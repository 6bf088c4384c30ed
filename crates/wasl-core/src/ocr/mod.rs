//! OCR: page image in, raw text out.

mod tesseract;

pub use tesseract::TesseractEngine;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Trait for OCR engines.
pub trait OcrEngine: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &str;

    /// Recognize the text of an image, optionally with a language hint.
    fn recognize(&self, image: &Path, language: Option<&str>) -> Result<String>;
}

/// Recognize one page, never failing.
///
/// Tries the configured language first, then (if enabled) the engine default,
/// and finally gives up with empty text.
pub fn recognize_page(engine: &dyn OcrEngine, image: &Path, config: &OcrConfig) -> String {
    let language = Some(config.language.as_str()).filter(|l| !l.is_empty());

    match engine.recognize(image, language) {
        Ok(text) => return text,
        Err(e) if language.is_some() && config.fallback_to_default_language => {
            debug!(
                "{} failed on {} with language {:?}: {}; retrying without hint",
                engine.name(),
                image.display(),
                language,
                e
            );
        }
        Err(e) => {
            warn!("OCR failed for {}: {}", image.display(), e);
            return String::new();
        }
    }

    engine.recognize(image, None).unwrap_or_else(|e| {
        warn!("OCR failed for {}: {}", image.display(), e);
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Fails for the listed language hints, records every call.
    struct Scripted {
        fail_on: Vec<Option<&'static str>>,
        calls: Mutex<Vec<Option<String>>>,
    }

    impl OcrEngine for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn recognize(&self, _image: &Path, language: Option<&str>) -> Result<String> {
            self.calls.lock().unwrap().push(language.map(str::to_string));
            if self.fail_on.iter().any(|l| *l == language) {
                return Err(OcrError::Failed {
                    code: 1,
                    stderr: "no data".to_string(),
                });
            }
            Ok(format!("text:{}", language.unwrap_or("default")))
        }
    }

    fn engine(fail_on: Vec<Option<&'static str>>) -> Scripted {
        Scripted {
            fail_on,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn test_hinted_language_used() {
        let e = engine(vec![]);
        let text = recognize_page(&e, Path::new("p.png"), &OcrConfig::default());
        assert_eq!(text, "text:ara+eng");
        assert_eq!(e.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_falls_back_to_default_language() {
        let e = engine(vec![Some("ara+eng")]);
        let text = recognize_page(&e, Path::new("p.png"), &OcrConfig::default());
        assert_eq!(text, "text:default");
        assert_eq!(
            *e.calls.lock().unwrap(),
            vec![Some("ara+eng".to_string()), None]
        );
    }

    #[test]
    fn test_total_failure_is_empty_text() {
        let e = engine(vec![Some("ara+eng"), None]);
        assert_eq!(recognize_page(&e, Path::new("p.png"), &OcrConfig::default()), "");
    }

    #[test]
    fn test_fallback_disabled() {
        let e = engine(vec![Some("ara+eng")]);
        let config = OcrConfig {
            fallback_to_default_language: false,
            ..OcrConfig::default()
        };
        assert_eq!(recognize_page(&e, Path::new("p.png"), &config), "");
        assert_eq!(e.calls.lock().unwrap().len(), 1);
    }
}
