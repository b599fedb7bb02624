//! Form filling pipeline.
//!
//! [`FormFiller`] fills and submits the mapped form for one row at a time
//! through any [`BrowserActions`](formfill_browser::BrowserActions)
//! implementation. [`run_pipeline`] ties loading, filling and reporting
//! together for the front ends.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod filler;
pub mod pipeline;
pub mod report;
pub mod success;

pub use error::{Result, RunError};
pub use filler::{FillSettings, FormFiller};
pub use pipeline::{run_pipeline, run_rows, RunEvent, RunOptions, RunSummary};
pub use report::write_report;
pub use success::SuccessCheck;
