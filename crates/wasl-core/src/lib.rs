//! Core library for turning scanned Arabic invoices into WhatsApp follow-up links.
//!
//! This crate provides:
//! - PDF rasterization (pdftoppm, mutool, embedded scan images)
//! - OCR through the Tesseract CLI
//! - Customer name and Saudi mobile number extraction from OCR text
//! - WhatsApp deep-link construction
//! - Dataset assembly with business-number exclusion and phone dedup
//! - CSV and JSON export

pub mod discovery;
pub mod error;
pub mod export;
pub mod extraction;
pub mod link;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;

pub use discovery::find_documents;
pub use error::{ExportError, OcrError, RasterError, Result, WaslError};
pub use export::{open_with_default_app, write_dataset};
pub use extraction::{extract_customer, find_name, find_phone, normalize, CustomerExtraction};
pub use link::LinkBuilder;
pub use models::config::{ExportFormat, WaslConfig};
pub use models::record::{DatasetStats, ExclusionSet, OutputDataset, PageRecord, UNKNOWN_NAME};
pub use ocr::{OcrEngine, TesseractEngine};
pub use pdf::{PageRasterizer, RenderedDocument};
pub use pipeline::{assemble_dataset, Pipeline, RecordAssembler};
