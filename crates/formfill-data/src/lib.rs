//! Formfill Data - Load tabular files into row records.
//!
//! Supports CSV, JSON (an array of flat objects) and spreadsheets. Every
//! loader maps missing-value markers onto [`CellValue::Null`] so the rest of
//! the pipeline sees one absence representation.
//!
//! # Example
//!
//! ```rust,no_run
//! use formfill_data::{column_names, load_data};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = load_data("people.csv")?;
//! println!("columns: {:?}", column_names(&rows));
//! # Ok(())
//! # }
//! ```
//!
//! [`CellValue::Null`]: formfill_core::CellValue::Null

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod delimited;
pub mod error;
pub mod json;
pub mod spreadsheet;
pub mod value;

pub use error::{DataError, Result};

use formfill_core::RowRecord;
use std::path::Path;
use tracing::{debug, info};

/// Recognised data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Comma-separated values
    Csv,
    /// Array of JSON objects
    Json,
    /// Excel or OpenDocument workbook
    Spreadsheet,
}

impl DataFormat {
    /// Pick a format from the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(DataError::UnsupportedFormat {
                extension: if extension.is_empty() {
                    String::new()
                } else {
                    format!(".{extension}")
                },
            }),
        }
    }
}

/// Load every record from a data file.
///
/// # Errors
/// - [`DataError::FileNotFound`] if the path does not exist
/// - [`DataError::UnsupportedFormat`] for an unrecognised extension
/// - a parse error from the underlying format
pub fn load_data(path: impl AsRef<Path>) -> Result<Vec<RowRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let format = DataFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "loading data file");

    let rows = match format {
        DataFormat::Csv => delimited::load_csv(path)?,
        DataFormat::Json => json::load_json(path)?,
        DataFormat::Spreadsheet => spreadsheet::load_spreadsheet(path)?,
    };

    info!(path = %path.display(), rows = rows.len(), "loaded data file");
    Ok(rows)
}

/// Column names of the data set, taken from the first row.
#[must_use]
pub fn column_names(rows: &[RowRecord]) -> Vec<String> {
    rows.first()
        .map(|row| row.columns().map(ToString::to_string).collect())
        .unwrap_or_default()
}
