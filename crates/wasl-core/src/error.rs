//! Error types for the wasl-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the wasl library.
#[derive(Error, Debug)]
pub enum WaslError {
    /// A required external tool is missing.
    #[error("{tool} is not available at '{path}'. {hint}")]
    CollaboratorUnavailable {
        tool: &'static str,
        path: String,
        hint: &'static str,
    },

    /// Input folder does not exist or is not a directory.
    #[error("input folder not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Invalid glob pattern while enumerating documents.
    #[error("invalid document pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a PDF into page images.
#[derive(Error, Debug)]
pub enum RasterError {
    /// The backend binary could not be started.
    #[error("{backend} could not be started: {reason}")]
    Spawn { backend: String, reason: String },

    /// The backend ran but exited with a failure status.
    #[error("{backend} failed with exit code {code}: {stderr}")]
    Failed {
        backend: String,
        code: i32,
        stderr: String,
    },

    /// The PDF could not be parsed.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The backend produced no page images.
    #[error("{0} produced no pages")]
    NoPages(String),

    /// An image could not be decoded or written.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error around the working directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Every configured backend failed.
    #[error("no rasterizer could open the document: {}", .0.join("; "))]
    AllBackendsFailed(Vec<String>),
}

/// Errors raised by an OCR engine for a single page.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR binary could not be started.
    #[error("failed to run OCR engine at '{path}': {reason}")]
    Spawn { path: String, reason: String },

    /// The OCR engine exited with a failure status.
    #[error("OCR engine failed with exit code {code}: {stderr}")]
    Failed { code: i32, stderr: String },
}

/// Errors raised while writing the output dataset.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the wasl library.
pub type Result<T> = std::result::Result<T, WaslError>;
