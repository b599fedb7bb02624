//! Error types for Tauri commands.

use serde::Serialize;

/// Serializable error for Tauri IPC commands.
#[derive(Debug, Serialize)]
pub struct CommandError {
    /// Error code for frontend handling (e.g., "MISSING_FILES")
    pub code: String,
    /// User-friendly error message
    pub message: String,
}

impl CommandError {
    /// Create a new command error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn missing_files() -> Self {
        Self::new(
            "MISSING_FILES",
            "Please select both a data file and a config file.",
        )
    }

    pub fn run_in_progress() -> Self {
        Self::new("RUN_IN_PROGRESS", "A run is already in progress.")
    }
}
