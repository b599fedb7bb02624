use clap::Parser;
use formfill_cli::detect::{self, DetectArgs};
use formfill_cli::fill::{self, FillArgs};
use formfill_core::MappingConfig;
use std::fs;
use tempfile::TempDir;

fn empty_settings(dir: &TempDir) -> String {
    let path = dir.path().join("settings.toml");
    fs::write(&path, "").unwrap();
    path.display().to_string()
}

#[test]
fn test_detect_writes_config() {
    let tmp = TempDir::new().unwrap();
    let form = tmp.path().join("form.html");
    let data = tmp.path().join("people.json");
    let out = tmp.path().join("mapping.json");
    fs::write(
        &form,
        r#"<form><label>Full name <input name="fullName"></label>
           <input type="submit" id="go"></form>"#,
    )
    .unwrap();
    fs::write(&data, r#"[{"full_name": "Ada"}]"#).unwrap();
    let settings = empty_settings(&tmp);

    let args = DetectArgs::parse_from([
        "formfill-detect",
        "--form-url",
        form.to_str().unwrap(),
        "--data-file",
        data.to_str().unwrap(),
        "--output-file",
        out.to_str().unwrap(),
        "--settings",
        &settings,
    ]);
    detect::run(&args).unwrap();

    let config = MappingConfig::load(&out).unwrap();
    assert_eq!(config.field_mappings.get("full_name"), Some("fullName"));
    assert_eq!(config.submit_button.value, "go");
}

#[tokio::test]
async fn test_fill_reports_missing_data_file() {
    let tmp = TempDir::new().unwrap();
    let settings = empty_settings(&tmp);
    let missing = tmp.path().join("nope.csv");

    let args = FillArgs::parse_from([
        "formfill",
        "--data-file",
        missing.to_str().unwrap(),
        "--config-file",
        "mapping.json",
        "--settings",
        &settings,
    ]);
    let err = fill::run(&args).await.unwrap_err();
    assert!(format!("{err:#}").contains("data file not found"));
}
