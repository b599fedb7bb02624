//! Formfill Tauri Application Shell
//!
//! Thin desktop front end over the fill pipeline: native file pickers, run
//! options and a live log. Core logic lives in the `crates/` directory.

pub mod commands;
pub mod error;
pub mod state;
pub mod worker;

use formfill_core::AppSettings;
use tauri::Manager;
use tracing::{info, warn};

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,formfill=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

fn load_settings() -> AppSettings {
    AppSettings::load_with_env(None).unwrap_or_else(|e| {
        warn!("Failed to load settings, using defaults: {}", e);
        AppSettings::default()
    })
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_tracing();

    info!("Starting Formfill v{}", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(state::AppState::new(load_settings()))
        .setup(|app| {
            #[cfg(debug_assertions)]
            {
                // Open devtools in debug builds
                if let Some(window) = app.get_webview_window("main") {
                    window.open_devtools();
                }
            }
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::files::select_data_file,
            commands::files::select_config_file,
            commands::run::get_run_defaults,
            commands::run::start_run,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
