//! Tauri command handlers.

pub mod files;
pub mod run;
