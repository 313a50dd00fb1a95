// File I/O operations

pub mod csv;
pub mod error;
pub mod export;
pub mod json;

use std::path::Path;

use dashgen_core::Dataset;

pub use error::IoError;
pub use export::{export, render_html, DEFAULT_EXPORT_FILE_NAME};

/// Rows kept per ingested file. Later rows are dropped.
pub const DEFAULT_MAX_ROWS: usize = 1000;

/// Load a dataset, choosing the decoder from the file extension.
pub fn load(path: &Path, max_rows: usize) -> Result<Dataset, IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => csv::import(path, max_rows),
        "json" => json::import(path, max_rows),
        _ => Err(IoError::UnsupportedFormat(if ext.is_empty() {
            "(no extension)".to_string()
        } else {
            ext
        })),
    }
}

/// Display name for a dataset read from `path`: the file name.
pub(crate) fn dataset_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
