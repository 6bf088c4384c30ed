//! Tesseract OCR through its command-line binary.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tracing::debug;

use super::{OcrEngine, Result};
use crate::error::OcrError;

/// Runs `tesseract <image> stdout [-l <lang>]`.
pub struct TesseractEngine {
    binary: PathBuf,
}

impl TesseractEngine {
    pub fn new(binary: impl AsRef<Path>) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
        }
    }

    /// Check if tesseract is available at the configured path.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Installed language data, from `tesseract --list-langs`.
    pub fn languages(&self) -> Result<Vec<String>> {
        let output = Command::new(&self.binary)
            .arg("--list-langs")
            .output()
            .map_err(|e| OcrError::Spawn {
                path: self.binary.display().to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_language_list(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `--list-langs` output; the first line is a header.
fn parse_language_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip_while(|line| !line.starts_with("List of available languages"))
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &Path, language: Option<&str>) -> Result<String> {
        let start = Instant::now();

        let mut command = Command::new(&self.binary);
        command.arg(image).arg("stdout");
        if let Some(language) = language {
            command.arg("-l").arg(language);
        }

        let output = command.output().map_err(|e| OcrError::Spawn {
            path: self.binary.display().to_string(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        debug!(
            "tesseract read {} chars from {} in {}ms",
            text.chars().count(),
            image.display(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary() {
        let engine = TesseractEngine::new("/nonexistent/tesseract");
        assert!(!engine.is_available());

        let err = engine
            .recognize(Path::new("page.png"), Some("ara"))
            .unwrap_err();
        assert!(matches!(err, OcrError::Spawn { .. }));
        assert!(engine.languages().is_err());
    }

    #[test]
    fn test_parse_language_list() {
        let stdout = "List of available languages in \"/usr/share/tessdata/\" (3):\nara\neng\nosd\n";
        assert_eq!(parse_language_list(stdout), vec!["ara", "eng", "osd"]);
        assert!(parse_language_list("").is_empty());
    }
}
