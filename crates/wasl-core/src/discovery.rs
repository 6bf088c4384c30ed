//! Discovery of invoice documents under an input folder.

use std::path::PathBuf;

use glob::{glob, Pattern};
use tracing::debug;

use crate::error::{Result, WaslError};
use crate::models::config::InputConfig;

/// List input documents, sorted by path.
///
/// Sorting makes the encounter order, and with it which duplicate phone
/// survives, the same on every platform.
pub fn find_documents(config: &InputConfig) -> Result<Vec<PathBuf>> {
    if !config.folder.is_dir() {
        return Err(WaslError::InputNotFound(config.folder.clone()));
    }

    let root = Pattern::escape(&config.folder.to_string_lossy());
    let pattern = if config.recursive {
        format!("{root}/**/*")
    } else {
        format!("{root}/*")
    };

    let extension = config.extension.trim_start_matches('.');
    let mut documents: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension))
        })
        .collect();

    documents.sort();
    debug!("Found {} documents with pattern {}", documents.len(), pattern);

    Ok(documents)
}
