//! The batch run: load, fill every row in order, report.

use crate::error::Result;
use crate::filler::{FillSettings, FormFiller};
use crate::report::write_report;
use formfill_browser::{BrowserActions, BrowserEngine, HumanPacing};
use formfill_core::{AppSettings, FillResult, MappingConfig, RowRecord};
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Inputs for one run. Settings supply everything else.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub data_file: PathBuf,
    pub config_file: PathBuf,
    pub report_dir: PathBuf,
    pub headless: bool,
    pub randomize_delay: bool,
}

impl RunOptions {
    /// Options for the given files with every flag taken from `settings`.
    pub fn new(data_file: impl Into<PathBuf>, config_file: impl Into<PathBuf>, settings: &AppSettings) -> Self {
        Self {
            data_file: data_file.into(),
            config_file: config_file.into(),
            report_dir: settings.report.dir.clone(),
            headless: settings.browser.headless,
            randomize_delay: settings.filling.randomize_delay,
        }
    }
}

/// Progress notifications emitted during a run.
#[derive(Debug, Clone)]
pub enum RunEvent {
    Message(String),
    DataLoaded { rows: usize },
    ConfigLoaded { form_url: String },
    RowStarted { index: usize, total: usize, label: String },
    RowFinished { index: usize, total: usize, result: FillResult },
    /// The run stopped on an error; always precedes `Finished` for load and launch failures
    Aborted { message: String },
    Finished,
    ReportWritten { path: PathBuf },
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => f.write_str(msg),
            Self::DataLoaded { rows } => write!(f, "Loaded {rows} rows of data."),
            Self::ConfigLoaded { form_url } => write!(f, "Configuration loaded for form: {form_url}"),
            Self::RowStarted { index, total, label } => {
                write!(f, "[{index}/{total}] Processing row for: {label}")
            }
            Self::RowFinished { result, .. } => {
                write!(f, "  -> Status: {} | Reason: {}", result.status, result.reason)
            }
            Self::Aborted { message } => write!(f, "Error: {message}"),
            Self::Finished => f.write_str("--- Automation Finished ---"),
            Self::ReportWritten { path } => {
                write!(f, "Submission report saved to: {}", path.display())
            }
        }
    }
}

/// Results of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub results: Vec<FillResult>,
    /// `None` when there were no rows to report
    pub report: Option<PathBuf>,
}

/// Run the whole pipeline with a real browser.
///
/// Data and config errors abort before the browser starts. A failed run
/// emits `Aborted` with the error, then `Finished`; a successful one emits
/// `Finished` followed by the report.
pub async fn run_pipeline<F>(options: &RunOptions, settings: &AppSettings, mut observer: F) -> Result<RunSummary>
where
    F: FnMut(RunEvent) + Send,
{
    let outcome = fill_all(options, settings, &mut observer).await;
    if let Err(e) = &outcome {
        observer(RunEvent::Aborted {
            message: e.to_string(),
        });
    }
    observer(RunEvent::Finished);
    let results = outcome?;

    let report = if results.is_empty() {
        None
    } else {
        let path = write_report(&options.report_dir, &results).inspect_err(|e| {
            observer(RunEvent::Aborted {
                message: e.to_string(),
            });
        })?;
        observer(RunEvent::ReportWritten { path: path.clone() });
        Some(path)
    };

    Ok(RunSummary { results, report })
}

async fn fill_all<F>(options: &RunOptions, settings: &AppSettings, observer: &mut F) -> Result<Vec<FillResult>>
where
    F: FnMut(RunEvent) + Send,
{
    observer(RunEvent::Message("Loading data...".to_string()));
    let rows = formfill_data::load_data(&options.data_file)?;
    observer(RunEvent::DataLoaded { rows: rows.len() });

    observer(RunEvent::Message("Loading form configuration...".to_string()));
    let config = MappingConfig::load(&options.config_file)?;
    observer(RunEvent::ConfigLoaded {
        form_url: config.form_url.clone(),
    });

    let mut browser_settings = settings.browser.clone();
    browser_settings.headless = options.headless;
    let engine = BrowserEngine::launch(&browser_settings).await?;

    let mut fill_settings = FillSettings::from_settings(&settings.filling);
    if !options.randomize_delay {
        fill_settings = fill_settings.with_pacing(HumanPacing::disabled());
    }
    let mut filler = FormFiller::new(config, engine, fill_settings);

    observer(RunEvent::Message("--- Starting Form Submission ---".to_string()));
    let results = run_rows(&mut filler, &rows, &settings.report.label_column, observer).await;

    if let Err(e) = filler.close().await {
        warn!("failed to close browser cleanly: {}", e);
    }
    Ok(results)
}

/// Fill `rows` one at a time, in order, reporting progress to `observer`.
pub async fn run_rows<B, F>(
    filler: &mut FormFiller<B>,
    rows: &[RowRecord],
    label_column: &str,
    observer: &mut F,
) -> Vec<FillResult>
where
    B: BrowserActions,
    F: FnMut(RunEvent) + Send,
{
    let total = rows.len();
    let mut results = Vec::with_capacity(total);

    for (i, row) in rows.iter().enumerate() {
        let index = i + 1;
        let label = row
            .get(label_column)
            .filter(|v| !v.is_null())
            .map_or_else(|| "N/A".to_string(), ToString::to_string);
        observer(RunEvent::RowStarted { index, total, label });

        let result = filler.fill(row).await;
        info!(row = index, status = %result.status, reason = %result.reason, "row processed");
        observer(RunEvent::RowFinished {
            index,
            total,
            result: result.clone(),
        });
        results.push(result);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_core::CellValue;

    #[test]
    fn test_event_lines() {
        let started = RunEvent::RowStarted {
            index: 1,
            total: 3,
            label: "Ada".to_string(),
        };
        assert_eq!(started.to_string(), "[1/3] Processing row for: Ada");

        let row: RowRecord = [("full_name".to_string(), CellValue::from("Ada"))]
            .into_iter()
            .collect();
        let finished = RunEvent::RowFinished {
            index: 1,
            total: 3,
            result: FillResult::success("Form submitted successfully.", row),
        };
        assert_eq!(
            finished.to_string(),
            "  -> Status: SUCCESS | Reason: Form submitted successfully."
        );
        assert_eq!(RunEvent::DataLoaded { rows: 2 }.to_string(), "Loaded 2 rows of data.");
        assert_eq!(
            RunEvent::Aborted {
                message: "data file not found at: x.csv".to_string()
            }
            .to_string(),
            "Error: data file not found at: x.csv"
        );
    }

    #[test]
    fn test_options_from_settings() {
        let settings = AppSettings::default();
        let options = RunOptions::new("rows.csv", "map.json", &settings);
        assert_eq!(options.report_dir, PathBuf::from("reports"));
        assert!(!options.headless);
        assert!(options.randomize_delay);
    }
}
