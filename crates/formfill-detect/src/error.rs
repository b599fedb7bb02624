use formfill_core::ConfigError;
use formfill_data::DataError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DetectError>;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("data file is empty: {path}")]
    EmptyData { path: String },

    #[error("form file not found at {path}")]
    FormNotFound { path: String },

    #[error("error loading data file: {0}")]
    Data(#[from] DataError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
