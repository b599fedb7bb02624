//! `formfill`: fill the mapped form once per data row.

use anyhow::Context;
use clap::Parser;
use formfill_core::AppSettings;
use formfill_filler::{run_pipeline, RunOptions, RunSummary};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "formfill", version, about = "Automated Form Filler Tool")]
pub struct FillArgs {
    /// Path to the data file (CSV, JSON, XLSX)
    #[arg(long)]
    pub data_file: PathBuf,

    /// Path to the JSON form mapping configuration file
    #[arg(long)]
    pub config_file: PathBuf,

    /// Directory to save the submission report
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Disable random delays between actions
    #[arg(long)]
    pub no_delay: bool,

    /// Run the browser in headless mode (no window)
    #[arg(long)]
    pub headless: bool,

    /// Settings TOML to use instead of the user config file
    #[arg(long, env = "FORMFILL_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl FillArgs {
    /// Run options with command-line flags layered over `settings`.
    pub fn options(&self, settings: &AppSettings) -> RunOptions {
        let mut options = RunOptions::new(&self.data_file, &self.config_file, settings);
        if let Some(dir) = &self.report_dir {
            options.report_dir = dir.clone();
        }
        options.headless |= self.headless;
        options.randomize_delay &= !self.no_delay;
        options
    }
}

/// Run the pipeline, printing one progress line per event.
pub async fn run(args: &FillArgs) -> anyhow::Result<RunSummary> {
    let settings = crate::load_settings(args.settings.as_deref())?;
    let options = args.options(&settings);
    tracing::debug!(?options, "starting run");

    run_pipeline(&options, &settings, |event| {
        tracing::debug!("{event}");
        println!("{event}");
    })
    .await
    .with_context(|| format!("run aborted for {}", options.data_file.display()))
}
