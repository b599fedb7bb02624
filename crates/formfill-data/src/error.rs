//! Error types for data loading.

use thiserror::Error;

/// Errors that can occur while loading a data file.
#[derive(Error, Debug)]
pub enum DataError {
    /// The data file does not exist
    #[error("data file not found at: {path}")]
    FileNotFound {
        /// Path that was requested
        path: String,
    },

    /// The file extension is not one of the supported formats
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// Extension as found on the path (may be empty)
        extension: String,
    },

    /// CSV parse failure
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse failure
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet could not be opened or read
    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    /// The file parsed but does not hold a table of records
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for data loading.
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::UnsupportedFormat {
            extension: ".txt".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported file format: .txt");

        let err = DataError::FileNotFound {
            path: "rows.csv".to_string(),
        };
        assert!(err.to_string().contains("rows.csv"));
    }
}
