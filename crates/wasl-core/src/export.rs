//! Writing the output dataset and handing it to the user.

use std::path::Path;
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::ExportError;
use crate::models::config::ExportFormat;
use crate::models::record::{DatasetStats, OutputDataset, COLUMNS};

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Byte order mark so spreadsheet applications read the CSV as UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Serialize)]
struct JsonExport<'a> {
    generated_at: DateTime<Utc>,
    stats: DatasetStats,
    records: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    name: &'a str,
    phone: &'a str,
    link: &'a str,
    file_name: &'a str,
    page: Option<u32>,
}

/// Render the dataset as CSV with the five output columns.
pub fn to_csv(dataset: &OutputDataset) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(UTF8_BOM.to_vec());

    wtr.write_record(COLUMNS)?;
    for record in &dataset.records {
        wtr.write_record([
            record.display_name(),
            record.display_phone(),
            record.link.as_str(),
            record.file_name.as_str(),
            record.display_page().as_str(),
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    let data = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(data)
}

/// Render the dataset as pretty JSON.
pub fn to_json(dataset: &OutputDataset) -> Result<Vec<u8>> {
    let export = JsonExport {
        generated_at: Utc::now(),
        stats: dataset.stats,
        records: dataset
            .records
            .iter()
            .map(|r| JsonRow {
                name: r.display_name(),
                phone: r.display_phone(),
                link: &r.link,
                file_name: &r.file_name,
                page: r.page,
            })
            .collect(),
    };

    Ok(serde_json::to_vec_pretty(&export)?)
}

/// Write the dataset to `path`.
pub fn write_dataset(dataset: &OutputDataset, path: &Path, format: ExportFormat) -> Result<()> {
    let data = match format {
        ExportFormat::Csv => to_csv(dataset)?,
        ExportFormat::Json => to_json(dataset)?,
    };

    std::fs::write(path, data).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {} records to {}", dataset.len(), path.display());
    Ok(())
}

/// Open a file with the system default application, ignoring failures.
pub fn open_with_default_app(path: &Path) {
    let result = if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn()
    } else if cfg!(target_os = "macos") {
        Command::new("open").arg(path).spawn()
    } else {
        Command::new("xdg-open").arg(path).spawn()
    };

    if let Err(e) = result {
        debug!("Could not open {}: {}", path.display(), e);
    }
}
