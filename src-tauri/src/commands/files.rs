//! Native file pickers for the data and mapping files.

use crate::error::CommandError;
use crate::state::{AppState, FileSlot};
use std::path::PathBuf;
use tauri::{AppHandle, Runtime, State};
use tauri_plugin_dialog::DialogExt;

const DATA_FILTERS: &[(&str, &[&str])] = &[
    ("All data files", &["csv", "json", "xlsx", "xls"]),
    ("CSV files", &["csv"]),
    ("JSON files", &["json"]),
    ("Excel files", &["xlsx", "xls"]),
];

const CONFIG_FILTERS: &[(&str, &[&str])] = &[("JSON config files", &["json"])];

async fn pick_file<R: Runtime>(
    app: &AppHandle<R>,
    title: &str,
    filters: &[(&str, &[&str])],
) -> Result<Option<PathBuf>, CommandError> {
    let (tx, rx) = tokio::sync::oneshot::channel();

    let mut dialog = app.dialog().file().set_title(title);
    for (name, extensions) in filters {
        dialog = dialog.add_filter(*name, extensions);
    }
    dialog.pick_file(move |picked| {
        let _ = tx.send(picked);
    });

    let picked = rx
        .await
        .map_err(|_| CommandError::new("DIALOG_FAILED", "File dialog closed unexpectedly"))?;

    picked
        .map(|file| {
            file.into_path().map_err(|e| {
                CommandError::new("INVALID_PATH", format!("Unsupported file location: {e}"))
            })
        })
        .transpose()
}

/// Pick the data file. Returns the basename shown in the window, or `None`
/// if the dialog was cancelled.
#[tauri::command]
pub async fn select_data_file<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
) -> Result<Option<String>, CommandError> {
    let picked = pick_file(&app, "Select Data File", DATA_FILTERS).await?;
    Ok(picked.map(|path| state.select(FileSlot::Data, path)))
}

/// Pick the mapping config file.
#[tauri::command]
pub async fn select_config_file<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
) -> Result<Option<String>, CommandError> {
    let picked = pick_file(&app, "Select Config File", CONFIG_FILTERS).await?;
    Ok(picked.map(|path| state.select(FileSlot::Config, path)))
}
