//! Data models and configuration.

pub mod config;
pub mod record;

pub use config::{ExportFormat, RasterBackend, WaslConfig};
pub use record::{DatasetStats, ExclusionSet, OutputDataset, PageRecord, COLUMNS, UNKNOWN_NAME};
