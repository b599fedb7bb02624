//! Command tests against a mock Tauri runtime.

use formfill_app::commands::run::{get_run_defaults, prepare_run};
use formfill_app::state::{AppState, FileSlot};
use formfill_core::AppSettings;
use std::path::PathBuf;
use tauri::Manager;

fn create_test_app(settings: AppSettings) -> tauri::App<tauri::test::MockRuntime> {
    let app = tauri::test::mock_app();
    app.manage(AppState::new(settings));
    app
}

#[test]
fn test_run_defaults_follow_settings() {
    let mut settings = AppSettings::default();
    settings.browser.headless = true;
    settings.filling.randomize_delay = false;
    let app = create_test_app(settings);

    let defaults = get_run_defaults(app.state::<AppState>());
    assert!(defaults.headless);
    assert!(defaults.disable_delay);
}

#[test]
fn test_start_requires_files() {
    let app = create_test_app(AppSettings::default());
    let state = app.state::<AppState>();

    let err = prepare_run(&state, false, false).unwrap_err();
    assert_eq!(err.code, "MISSING_FILES");
    assert_eq!(
        err.message,
        "Please select both a data file and a config file."
    );
}

#[test]
fn test_run_uses_report_dir_from_settings() {
    let mut settings = AppSettings::default();
    settings.report.dir = PathBuf::from("/tmp/formfill-reports");
    let app = create_test_app(settings);
    let state = app.state::<AppState>();
    state.select(FileSlot::Data, PathBuf::from("rows.xlsx"));
    state.select(FileSlot::Config, PathBuf::from("map.json"));

    let options = prepare_run(&state, false, false).unwrap();
    assert_eq!(options.report_dir, PathBuf::from("/tmp/formfill-reports"));
    assert!(options.randomize_delay);
    assert!(state.is_running());
}
