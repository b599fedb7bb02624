//! Application settings for formfill.
//!
//! Provides TOML-based settings with XDG-compliant paths and environment
//! variable overrides. Command-line flags are applied on top by the front ends.

use crate::error::{ConfigError, ConfigResult};
use crate::types::SuccessIndicator;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application settings.
///
/// This is loaded from `~/.config/formfill/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Browser session settings
    pub browser: BrowserSettings,
    /// Per-row filling behaviour
    pub filling: FillingSettings,
    /// Field auto-detection settings
    pub detection: DetectionSettings,
    /// Submission report settings
    pub report: ReportSettings,
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Settings file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load settings from an explicit TOML file.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading settings from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let settings = toml::from_str(&contents)?;
        Ok(settings)
    }

    /// Load settings (from `path` if given) with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `FORMFILL_HEADLESS`: Override browser headless mode (true/false)
    /// - `FORMFILL_PLACEHOLDER`: Override the placeholder for blank values
    /// - `FORMFILL_SUCCESS_URL`: Success when the post-submit URL contains this
    /// - `FORMFILL_THRESHOLD`: Override the fuzzy matching threshold
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut settings = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        settings.apply_env_overrides(|key| std::env::var(key).ok());
        settings.validate()?;
        Ok(settings)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("FORMFILL_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(val) = lookup("FORMFILL_PLACEHOLDER") {
            tracing::debug!("Override filling.placeholder from env: {}", val);
            self.filling.placeholder = val;
        }

        if let Some(val) = lookup("FORMFILL_SUCCESS_URL") {
            tracing::debug!("Override filling.success_indicator from env: {}", val);
            self.filling.success_indicator = SuccessIndicator::UrlContains { url_contains: val };
        }

        if let Some(val) = lookup("FORMFILL_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                self.detection.threshold = threshold;
                tracing::debug!("Override detection.threshold from env: {}", threshold);
            }
        }
    }

    /// Reject settings that cannot drive a run.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.detection.threshold > 100 {
            return Err(ConfigError::InvalidValue {
                field: "detection.threshold".to_string(),
                reason: format!("must be 0-100, got {}", self.detection.threshold),
            });
        }

        if self.filling.min_delay_ms > self.filling.max_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "filling.min_delay_ms".to_string(),
                reason: format!(
                    "must not exceed max_delay_ms ({} > {})",
                    self.filling.min_delay_ms, self.filling.max_delay_ms
                ),
            });
        }

        if self.filling.placeholder.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "filling.placeholder".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the path to the settings file.
    ///
    /// Uses XDG base directories: `~/.config/formfill/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "formfill", "formfill").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Browser session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run browser without a window
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// CDP request timeout in seconds
    pub request_timeout_secs: u64,
    /// How long element lookups keep polling before giving up
    pub element_wait_ms: u64,
    /// Chrome/Chromium binary; autodetected when unset
    pub chrome_executable: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: false,
            window_width: 1920,
            window_height: 1080,
            request_timeout_secs: 30,
            element_wait_ms: 5000,
            chrome_executable: None,
        }
    }
}

/// Per-row filling behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FillingSettings {
    /// Typed into mapped fields whose value is blank or missing
    pub placeholder: String,
    /// Sleep a random interval after navigation and after each field
    pub randomize_delay: bool,
    /// Lower bound of the random pause
    pub min_delay_ms: u64,
    /// Upper bound of the random pause
    pub max_delay_ms: u64,
    /// Settle time between clicking submit and checking the result
    pub post_submit_wait_ms: u64,
    /// Default success check; a mapping config may override it
    pub success_indicator: SuccessIndicator,
}

impl Default for FillingSettings {
    fn default() -> Self {
        Self {
            placeholder: "N/A".to_string(),
            randomize_delay: true,
            min_delay_ms: 300,
            max_delay_ms: 1000,
            post_submit_wait_ms: 1000,
            success_indicator: SuccessIndicator::default(),
        }
    }
}

/// Field auto-detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    /// Minimum fuzzy score (0-100) to accept a column-to-label match
    pub threshold: u8,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self { threshold: 75 }
    }
}

/// Submission report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Directory reports are written to
    pub dir: PathBuf,
    /// Column whose value labels each row in progress output
    pub label_column: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("reports"),
            label_column: "full_name".to_string(),
        }
    }
}
