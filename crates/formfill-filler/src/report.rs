//! CSV run reports.

use crate::error::Result;
use chrono::Local;
use formfill_core::FillResult;
use std::fs;
use std::path::{Path, PathBuf};

const HEADER: [&str; 4] = ["Timestamp", "Status", "Reason", "Data"];

/// Write one report row per result to `dir/report_YYYYMMDD_HHMMSS.csv`.
///
/// The directory is created if missing. Returns the path written.
pub fn write_report(dir: &Path, results: &[FillResult]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("report_{}.csv", Local::now().format("%Y%m%d_%H%M%S")));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(HEADER)?;
    for result in results {
        let data = serde_json::to_string(&result.data).map_err(std::io::Error::from)?;
        writer.write_record([
            Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string().as_str(),
            result.status.as_str(),
            result.reason.as_str(),
            data.as_str(),
        ])?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = results.len(), "report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_core::{CellValue, RowRecord};
    use tempfile::TempDir;

    fn row(name: &str) -> RowRecord {
        [("full_name".to_string(), CellValue::from(name))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_write_report() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("reports");
        let results = vec![
            FillResult::success("Form submitted successfully.", row("Ada")),
            FillResult::failed("Could not find element with name='x'", row("Grace, \"Amazing\"")),
        ];

        let path = write_report(&dir, &results).unwrap();
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("report_"));
        assert!(file_name.ends_with(".csv"));
        assert_eq!(file_name.len(), "report_20240101_120000.csv".len());

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap(), vec!["Timestamp", "Status", "Reason", "Data"]);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][1], "SUCCESS");
        assert_eq!(&records[0][3], r#"{"full_name":"Ada"}"#);
        assert_eq!(&records[1][1], "FAILED");
        assert_eq!(&records[1][2], "Could not find element with name='x'");
        assert_eq!(&records[1][3], r#"{"full_name":"Grace, \"Amazing\""}"#);

        // Local ISO timestamp with microseconds
        let ts = &records[0][0];
        assert_eq!(ts.len(), "2024-01-01T12:00:00.000000".len());
        assert_eq!(&ts[10..11], "T");
    }
}
