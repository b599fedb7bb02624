//! Configuration error types.
//!
//! Covers both the TOML application settings and the JSON mapping config.

use thiserror::Error;

/// Errors raised while loading, saving or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Config file not found
    #[error("configuration file not found at: {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML settings
    #[error("failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Mapping config is not valid JSON of the expected shape
    #[error("invalid mapping config in {path}: {source}")]
    Json {
        /// Path of the mapping config
        path: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
