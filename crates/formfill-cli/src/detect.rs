//! `formfill-detect`: generate a mapping config from a form and a data file.

use anyhow::Context;
use clap::Parser;
use formfill_detect::{detect_from_files, Detection};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "formfill-detect",
    version,
    about = "Auto-detect form fields and generate a mapping config"
)]
pub struct DetectArgs {
    /// Path to the local HTML form file
    #[arg(long)]
    pub form_url: PathBuf,

    /// Path to the data file (CSV, JSON, XLSX) to read headers from
    #[arg(long)]
    pub data_file: PathBuf,

    /// Where to save the generated JSON mapping config
    #[arg(long)]
    pub output_file: PathBuf,

    /// Fuzzy matching score threshold (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,

    /// Settings TOML to use instead of the user config file
    #[arg(long, env = "FORMFILL_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Detect, print the match table and write the config.
pub fn run(args: &DetectArgs) -> anyhow::Result<Detection> {
    let settings = crate::load_settings(args.settings.as_deref())?;
    let threshold = args.threshold.unwrap_or(settings.detection.threshold);

    println!("--- Starting Field Auto-Detection ---");
    let detection = detect_from_files(&args.form_url, &args.data_file, threshold)?;

    for line in summary_lines(&detection, threshold) {
        println!("{line}");
    }

    detection
        .config
        .save(&args.output_file)
        .with_context(|| format!("failed to write {}", args.output_file.display()))?;
    println!(
        "\nSuccessfully generated mapping config at: {}",
        args.output_file.display()
    );
    Ok(detection)
}

/// Operator-facing report of what was detected and matched.
pub fn summary_lines(detection: &Detection, threshold: u8) -> Vec<String> {
    let labels: Vec<&str> = detection.fields.iter().map(|f| f.label.as_str()).collect();
    let mut lines = vec![
        format!("Detected data headers: {:?}", detection.columns),
        format!("Detected form fields: {labels:?}"),
        String::new(),
        format!("--- Matching Fields (Threshold >= {threshold}%) ---"),
    ];

    for column in &detection.columns {
        if let Some(m) = detection.matches.iter().find(|m| &m.column == column) {
            lines.push(format!(
                "  Matched '{}' (data) -> '{}' (label) -> '{}' (field) [Score: {}]",
                m.column, m.label, m.field, m.score
            ));
        } else if let Some(miss) = detection.unmatched.iter().find(|u| &u.column == column) {
            lines.push(match (&miss.best_guess, miss.score) {
                (Some(guess), Some(score)) => format!(
                    "  No confident match for '{}' [Best guess: '{guess}', Score: {score}]",
                    miss.column
                ),
                _ => format!("  No confident match for '{}' [no labelled fields]", miss.column),
            });
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_detect::detect;

    #[test]
    fn test_summary_lines() {
        let html = r#"<label for="e">Email</label><input id="e" name="email">"#;
        let columns = vec!["email".to_string(), "zip".to_string()];
        let detection = detect(html, &columns, 75, "form.html");

        let lines = summary_lines(&detection, 75);
        assert_eq!(lines[0], r#"Detected data headers: ["email", "zip"]"#);
        assert_eq!(lines[1], r#"Detected form fields: ["Email"]"#);
        assert_eq!(
            lines[4],
            "  Matched 'email' (data) -> 'Email' (label) -> 'email' (field) [Score: 100]"
        );
        assert!(lines[5].starts_with("  No confident match for 'zip' [Best guess: 'Email'"));
    }

    #[test]
    fn test_threshold_range() {
        let parsed = DetectArgs::try_parse_from([
            "formfill-detect",
            "--form-url",
            "f.html",
            "--data-file",
            "d.csv",
            "--output-file",
            "o.json",
            "--threshold",
            "101",
        ]);
        assert!(parsed.is_err());
    }
}
