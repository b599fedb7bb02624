//! Formfill Core - Foundation crate for the formfill workspace.
//!
//! This crate provides the shared data model, error handling, application
//! settings and the mapping-config loader that every other formfill crate
//! depends on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based application settings with XDG paths
//! - [`types`] - Row records, cell values and fill results
//! - [`mapping`] - The JSON mapping config linking data columns to form fields
//!
//! # Example
//!
//! ```rust
//! use formfill_core::{AppSettings, CellValue, RowRecord};
//!
//! let settings = AppSettings::default();
//! assert_eq!(settings.filling.placeholder, "N/A");
//!
//! let row: RowRecord = [("full_name".to_string(), CellValue::from("Ada"))]
//!     .into_iter()
//!     .collect();
//! assert_eq!(row.get("full_name"), Some(&CellValue::from("Ada")));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod mapping;
pub mod types;

// Re-export commonly used types
pub use config::{AppSettings, BrowserSettings, DetectionSettings, FillingSettings, ReportSettings};
pub use error::{ConfigError, ConfigResult};
pub use mapping::{FieldMappings, MappingConfig, SubmitButton, SubmitKind};
pub use types::{CellValue, FillResult, FillStatus, RowRecord, SuccessIndicator};
