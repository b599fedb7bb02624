use formfill_browser::BrowserError;
use formfill_core::ConfigError;
use formfill_data::DataError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RunError>;

/// Faults that abort a whole run.
///
/// Per-row problems never surface here; they become
/// [`FillResult`](formfill_core::FillResult)s.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start browser: {0}")]
    Browser(#[from] BrowserError),

    #[error("failed to write report: {0}")]
    Report(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
