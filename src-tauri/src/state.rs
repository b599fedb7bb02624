//! Application state management.

use formfill_core::AppSettings;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Which file a picker fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSlot {
    Data,
    Config,
}

/// State shared across all Tauri commands.
pub struct AppState {
    /// Loaded once at startup; flags from the window override it per run
    pub settings: AppSettings,
    data_file: Mutex<Option<PathBuf>>,
    config_file: Mutex<Option<PathBuf>>,
    /// Set while a run is active; cleared by the drain task
    running: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            data_file: Mutex::new(None),
            config_file: Mutex::new(None),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    fn slot(&self, slot: FileSlot) -> &Mutex<Option<PathBuf>> {
        match slot {
            FileSlot::Data => &self.data_file,
            FileSlot::Config => &self.config_file,
        }
    }

    /// Remember a picked file; returns its basename for display.
    pub fn select(&self, slot: FileSlot, path: PathBuf) -> String {
        let shown = basename(&path);
        tracing::info!(?slot, path = %path.display(), "file selected");
        if let Ok(mut guard) = self.slot(slot).lock() {
            *guard = Some(path);
        }
        shown
    }

    pub fn selected(&self, slot: FileSlot) -> Option<PathBuf> {
        self.slot(slot).lock().ok().and_then(|guard| guard.clone())
    }

    /// Both files, if both have been picked.
    pub fn selected_pair(&self) -> Option<(PathBuf, PathBuf)> {
        Some((self.selected(FileSlot::Data)?, self.selected(FileSlot::Config)?))
    }

    /// Claim the single run slot. Returns false if a run is already active.
    pub fn try_begin_run(&self) -> bool {
        !self.running.swap(true, Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Handle the background task uses to release the run slot.
    pub fn run_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_shows_basename() {
        let state = AppState::default();
        let shown = state.select(FileSlot::Data, PathBuf::from("/home/ada/data/people.csv"));
        assert_eq!(shown, "people.csv");
        assert_eq!(
            state.selected(FileSlot::Data),
            Some(PathBuf::from("/home/ada/data/people.csv"))
        );
        assert_eq!(state.selected(FileSlot::Config), None);
    }

    #[test]
    fn test_selected_pair_needs_both() {
        let state = AppState::default();
        state.select(FileSlot::Config, PathBuf::from("map.json"));
        assert!(state.selected_pair().is_none());
        state.select(FileSlot::Data, PathBuf::from("rows.csv"));
        assert_eq!(
            state.selected_pair(),
            Some((PathBuf::from("rows.csv"), PathBuf::from("map.json")))
        );
    }

    #[test]
    fn test_single_run_slot() {
        let state = AppState::default();
        assert!(state.try_begin_run());
        assert!(!state.try_begin_run());
        state.run_flag().store(false, Ordering::SeqCst);
        assert!(!state.is_running());
        assert!(state.try_begin_run());
    }
}
