//! Filling and submitting one form per data row.

use crate::success::SuccessCheck;
use formfill_browser::{resolve_form_url, BrowserActions, BrowserError, FormControl, HumanPacing, Locator};
use formfill_core::{CellValue, FillResult, FillingSettings, MappingConfig, RowRecord};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tunables for a [`FormFiller`].
pub struct FillSettings {
    /// Typed into fields whose value is missing or blank
    pub placeholder: String,
    pub pacing: HumanPacing,
    /// Pause between clicking submit and checking for success
    pub post_submit_wait: Duration,
    pub success: Box<dyn SuccessCheck>,
}

impl FillSettings {
    /// Build from the `[filling]` section of the application settings.
    pub fn from_settings(settings: &FillingSettings) -> Self {
        let pacing = if settings.randomize_delay {
            HumanPacing::new(
                Duration::from_millis(settings.min_delay_ms),
                Duration::from_millis(settings.max_delay_ms),
            )
        } else {
            HumanPacing::disabled()
        };

        Self {
            placeholder: settings.placeholder.clone(),
            pacing,
            post_submit_wait: Duration::from_millis(settings.post_submit_wait_ms),
            success: Box::new(settings.success_indicator.clone()),
        }
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: HumanPacing) -> Self {
        self.pacing = pacing;
        self
    }
}

impl Default for FillSettings {
    fn default() -> Self {
        Self::from_settings(&FillingSettings::default())
    }
}

/// Why a row stopped before reaching the success check.
enum Abort {
    Browser(BrowserError),
    Unexpected(String),
}

impl From<BrowserError> for Abort {
    fn from(e: BrowserError) -> Self {
        Self::Browser(e)
    }
}

/// Drives one browser session through a sequence of rows.
///
/// The filler owns the session exclusively; [`FormFiller::close`] releases
/// it.
pub struct FormFiller<B: BrowserActions> {
    config: MappingConfig,
    browser: B,
    settings: FillSettings,
}

impl<B: BrowserActions> FormFiller<B> {
    /// A success indicator in `config` replaces the one in `settings`.
    pub fn new(config: MappingConfig, browser: B, mut settings: FillSettings) -> Self {
        if let Some(indicator) = &config.success_indicator {
            debug!(?indicator, "using success indicator from mapping config");
            settings.success = Box::new(indicator.clone());
        }
        Self {
            config,
            browser,
            settings,
        }
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Fill and submit the form for one row.
    ///
    /// Never fails: every outcome, including browser faults, is a
    /// [`FillResult`] carrying the row.
    pub async fn fill(&mut self, row: &RowRecord) -> FillResult {
        let data = row.clone();

        if let Err(abort) = self.fill_and_submit(row).await {
            return match abort {
                Abort::Browser(e) if e.is_element_not_found() => FillResult::failed(e.to_string(), data),
                Abort::Browser(e) => {
                    warn!("browser error while filling row: {}", e);
                    FillResult::failed(
                        format!("A browser or element error occurred: {}", e.category()),
                        data,
                    )
                }
                Abort::Unexpected(msg) => {
                    FillResult::failed(format!("An unexpected error occurred: {msg}"), data)
                }
            };
        }

        tokio::time::sleep(self.settings.post_submit_wait).await;

        match self.settings.success.check(&self.browser).await {
            Ok(true) => FillResult::success("Form submitted successfully.", data),
            Ok(false) => FillResult::failed(
                "Submission did not lead to the expected success page.",
                data,
            ),
            Err(e) => {
                warn!("browser lost after submission: {}", e);
                FillResult::crashed(
                    format!(
                        "Browser window closed unexpectedly after submission. Error: {}",
                        e.category()
                    ),
                    data,
                )
            }
        }
    }

    async fn fill_and_submit(&self, row: &RowRecord) -> Result<(), Abort> {
        let url = resolve_form_url(&self.config.form_url).map_err(|e| Abort::Unexpected(e.to_string()))?;
        self.browser.navigate(&url).await?;
        self.settings.pacing.pause().await;

        for (column, field) in self.config.field_mappings.iter() {
            let value = match row.get(column) {
                Some(v) if !v.is_blank() => v.clone(),
                _ => {
                    info!(
                        column,
                        placeholder = %self.settings.placeholder,
                        "Using placeholder for empty field"
                    );
                    CellValue::Text(self.settings.placeholder.clone())
                }
            };

            self.fill_one(field, &value).await?;
            self.settings.pacing.pause().await;
        }

        let submit = Locator::from(&self.config.submit_button);
        debug!(%submit, "submitting form");
        self.browser.click(&submit).await?;
        Ok(())
    }

    async fn fill_one(&self, field: &str, value: &CellValue) -> Result<(), BrowserError> {
        let locator = Locator::Name(field.to_string());
        let text = value.to_string();

        match self.browser.inspect(&locator).await? {
            FormControl::Select => self.browser.select_option(&locator, &text).await,
            FormControl::Radio { name } => {
                let group = if name.is_empty() { field } else { name.as_str() };
                self.browser.click(&Locator::radio_option(group, &text)).await
            }
            FormControl::Checkbox => {
                if value.is_truthy() {
                    self.browser.click(&locator).await
                } else {
                    Ok(())
                }
            }
            FormControl::Text => self.browser.fill_field(&locator, &text).await,
            FormControl::Unsupported { tag, kind } => {
                warn!(field, %tag, kind = ?kind, "Unsupported element type, skipping");
                Ok(())
            }
        }
    }

    /// Shut the browser session down.
    pub async fn close(mut self) -> Result<(), BrowserError> {
        self.browser.shutdown().await
    }
}
