//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the wasl pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaslConfig {
    /// Where invoices are read from.
    pub input: InputConfig,

    /// Where the dataset is written.
    pub output: OutputConfig,

    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// PDF rasterization configuration.
    pub pdf: PdfConfig,

    /// Messaging link configuration.
    pub messaging: MessagingConfig,

    /// Numbers that never count as customer numbers.
    pub exclusion: ExclusionConfig,
}

/// Input document discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Folder containing invoice PDFs.
    pub folder: PathBuf,

    /// File extension to pick up (matched case-insensitively, without the dot).
    pub extension: String,

    /// Descend into subfolders.
    pub recursive: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("invoices"),
            extension: "pdf".to_string(),
            recursive: true,
        }
    }
}

/// Dataset file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma separated values, readable by spreadsheet applications.
    Csv,
    /// JSON document with records and counts.
    Json,
}

/// Output dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path.
    pub path: PathBuf,

    /// Output file format.
    pub format: ExportFormat,

    /// Open the written file with the system default application.
    pub open_after_write: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("whatsapp_links.csv"),
            format: ExportFormat::Csv,
            open_after_write: true,
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Path to the tesseract binary.
    pub tesseract_path: PathBuf,

    /// Tesseract language hint.
    pub language: String,

    /// Retry without a language hint when the hinted run fails.
    pub fallback_to_default_language: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: PathBuf::from("tesseract"),
            language: "ara+eng".to_string(),
            fallback_to_default_language: true,
        }
    }
}

/// A way of turning a PDF into page images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterBackend {
    /// Poppler's `pdftoppm`.
    Pdftoppm,
    /// MuPDF's `mutool draw`.
    Mutool,
    /// Scan images embedded in the PDF, read in-process.
    Embedded,
}

impl RasterBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            RasterBackend::Pdftoppm => "pdftoppm",
            RasterBackend::Mutool => "mutool",
            RasterBackend::Embedded => "embedded",
        }
    }
}

/// PDF rasterization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// DPI for rendering PDF pages to images.
    pub render_dpi: u32,

    /// Path to the pdftoppm binary.
    pub pdftoppm_path: PathBuf,

    /// Path to the mutool binary.
    pub mutool_path: PathBuf,

    /// Backends to try, in order.
    pub backends: Vec<RasterBackend>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            render_dpi: 200,
            pdftoppm_path: PathBuf::from("pdftoppm"),
            mutool_path: PathBuf::from("mutool"),
            backends: vec![
                RasterBackend::Pdftoppm,
                RasterBackend::Mutool,
                RasterBackend::Embedded,
            ],
        }
    }
}

/// Default greeting; `{name}` and `{review_link}` are substituted.
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "مرحباً {name} 👋، نشكرك على زيارتك لمركز مازدا ونأمل تقييم خدمتنا في جوجل 🌟\n\nرابط التقييم: {review_link}";

/// Messaging link configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Review page the customer is invited to.
    pub review_link: String,

    /// Country calling code replacing the leading 0 of local numbers.
    pub country_code: String,

    /// Message body template.
    pub message_template: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            review_link: "https://g.page/r/YOUR_GOOGLE_REVIEW_LINK".to_string(),
            country_code: "966".to_string(),
            message_template: DEFAULT_MESSAGE_TEMPLATE.to_string(),
        }
    }
}

/// Business numbers excluded from customer detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// The business's own phone numbers.
    pub business_numbers: Vec<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            business_numbers: vec!["0566522351".to_string(), "0556565135".to_string()],
        }
    }
}

impl WaslConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
