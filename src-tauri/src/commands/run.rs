//! Starting fill runs from the window.

use crate::error::CommandError;
use crate::state::AppState;
use crate::worker::{drain_logs, spawn_worker, RunFinished, RunLog, DRAIN_INTERVAL};
use formfill_filler::RunOptions;
use serde::Serialize;
use std::sync::atomic::Ordering;
use tauri::{AppHandle, Emitter, Runtime, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

/// Initial state of the option checkboxes.
#[derive(Debug, Clone, Serialize)]
pub struct RunDefaults {
    pub headless: bool,
    pub disable_delay: bool,
}

#[tauri::command]
pub fn get_run_defaults(state: State<'_, AppState>) -> RunDefaults {
    RunDefaults {
        headless: state.settings.browser.headless,
        disable_delay: !state.settings.filling.randomize_delay,
    }
}

/// Validate the selection and claim the run slot.
pub fn prepare_run(
    state: &AppState,
    headless: bool,
    disable_delay: bool,
) -> Result<RunOptions, CommandError> {
    let (data_file, config_file) = state
        .selected_pair()
        .ok_or_else(CommandError::missing_files)?;
    if !state.try_begin_run() {
        return Err(CommandError::run_in_progress());
    }

    let mut options = RunOptions::new(data_file, config_file, &state.settings);
    options.headless = headless;
    options.randomize_delay = !disable_delay;
    Ok(options)
}

/// Start a run in the background and return its id.
///
/// Log lines arrive as `run:log` events every 100 ms; `run:finished` follows
/// once the run has ended and the slot is free again.
#[tauri::command]
pub async fn start_run<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
    headless: bool,
    disable_delay: bool,
) -> Result<String, CommandError> {
    let options = prepare_run(&state, headless, disable_delay)?;
    let run_id = Uuid::new_v4().to_string();
    info!(%run_id, data = %options.data_file.display(), "starting run");

    let (tx, rx) = mpsc::unbounded_channel();
    let worker = spawn_worker(options, state.settings.clone(), tx);
    let running = state.run_flag();
    let id = run_id.clone();

    tokio::spawn(async move {
        let outcome = drain_logs(rx, worker, DRAIN_INTERVAL, |lines| {
            let _ = app.emit(
                "run:log",
                RunLog {
                    run_id: id.clone(),
                    lines,
                },
            );
        })
        .await;

        if let Some(err) = &outcome.error {
            app.dialog()
                .message(format!("An unexpected error occurred:\n{err}"))
                .title("Fatal Error")
                .kind(MessageDialogKind::Error)
                .show(|_| {});
        }

        running.store(false, Ordering::SeqCst);
        let _ = app.emit(
            "run:finished",
            RunFinished {
                run_id: id,
                report: outcome.report,
                error: outcome.error,
            },
        );
    });

    Ok(run_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FileSlot;
    use std::path::PathBuf;

    #[test]
    fn test_prepare_requires_both_files() {
        let state = AppState::default();
        state.select(FileSlot::Data, PathBuf::from("rows.csv"));
        let err = prepare_run(&state, false, false).unwrap_err();
        assert_eq!(err.code, "MISSING_FILES");
        assert!(!state.is_running());
    }

    #[test]
    fn test_prepare_rejects_second_run() {
        let state = AppState::default();
        state.select(FileSlot::Data, PathBuf::from("rows.csv"));
        state.select(FileSlot::Config, PathBuf::from("map.json"));

        let options = prepare_run(&state, true, true).unwrap();
        assert!(options.headless);
        assert!(!options.randomize_delay);
        assert_eq!(options.config_file, PathBuf::from("map.json"));

        let err = prepare_run(&state, false, false).unwrap_err();
        assert_eq!(err.code, "RUN_IN_PROGRESS");
    }
}
