//! Field auto-detection.
//!
//! Reads a local HTML form, resolves a label for every named field and
//! fuzzy-matches data column names against those labels to produce a
//! [`MappingConfig`].
//!
//! ```rust
//! use formfill_detect::detect;
//!
//! let html = r#"<form>
//!     <label for="fn">Full name</label><input id="fn" name="fullName">
//!     <button type="submit" id="go">Send</button>
//! </form>"#;
//! let columns = vec!["full_name".to_string(), "zzz".to_string()];
//! let detection = detect(html, &columns, 75, "form.html");
//!
//! assert_eq!(detection.config.field_mappings.get("full_name"), Some("fullName"));
//! assert_eq!(detection.unmatched.len(), 1);
//! ```

pub mod error;
pub mod form;
pub mod fuzzy;

pub use error::{DetectError, Result};
pub use form::{find_submit_button, scan_fields, LabeledField};

use formfill_core::{FieldMappings, MappingConfig};
use scraper::Html;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Default minimum score for a column to be mapped.
pub const DEFAULT_THRESHOLD: u8 = 75;

/// A column mapped to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMatch {
    pub column: String,
    pub label: String,
    pub field: String,
    pub score: u8,
}

/// A column left out of the mapping, with the closest label if there was one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedColumn {
    pub column: String,
    pub best_guess: Option<String>,
    pub score: Option<u8>,
}

/// Outcome of matching a form against a set of columns.
#[derive(Debug, Clone)]
pub struct Detection {
    pub config: MappingConfig,
    /// Data columns in the order they were matched
    pub columns: Vec<String>,
    /// Every labelled field found in the form
    pub fields: Vec<LabeledField>,
    pub matches: Vec<FieldMatch>,
    pub unmatched: Vec<UnmatchedColumn>,
}

/// Match `columns` against the labelled fields of `html`.
pub fn detect(html: &str, columns: &[String], threshold: u8, form_url: &str) -> Detection {
    let document = Html::parse_document(html);
    let fields = scan_fields(&document);

    let mut mappings = FieldMappings::new();
    let mut matches = Vec::new();
    let mut unmatched = Vec::new();

    for column in columns {
        let best = fuzzy::best_match(column, fields.iter().map(|f| f.label.as_str()));
        match best {
            Some((idx, score)) if score >= threshold => {
                let field = &fields[idx];
                info!(column = %column, label = %field.label, field = %field.name, score, "matched");
                mappings.insert(column.as_str(), field.name.as_str());
                matches.push(FieldMatch {
                    column: column.clone(),
                    label: field.label.clone(),
                    field: field.name.clone(),
                    score,
                });
            }
            Some((idx, score)) => {
                warn!(column = %column, best_guess = %fields[idx].label, score, "no confident match");
                unmatched.push(UnmatchedColumn {
                    column: column.clone(),
                    best_guess: Some(fields[idx].label.clone()),
                    score: Some(score),
                });
            }
            None => {
                warn!(column = %column, "no labelled fields to match against");
                unmatched.push(UnmatchedColumn {
                    column: column.clone(),
                    best_guess: None,
                    score: None,
                });
            }
        }
    }

    Detection {
        config: MappingConfig {
            form_url: form_url.to_string(),
            field_mappings: mappings,
            submit_button: find_submit_button(&document),
            success_indicator: None,
        },
        columns: columns.to_vec(),
        fields,
        matches,
        unmatched,
    }
}

/// Load the data file for its columns, read the form and run [`detect`].
pub fn detect_from_files(form_path: &Path, data_path: &Path, threshold: u8) -> Result<Detection> {
    let rows = formfill_data::load_data(data_path)?;
    if rows.is_empty() {
        return Err(DetectError::EmptyData {
            path: data_path.display().to_string(),
        });
    }
    let columns = formfill_data::column_names(&rows);

    if !form_path.exists() {
        return Err(DetectError::FormNotFound {
            path: form_path.display().to_string(),
        });
    }
    let html = std::fs::read_to_string(form_path)?;

    let form_url = relative_to_cwd(form_path);
    Ok(detect(&html, &columns, threshold, &form_url))
}

/// The path relative to the working directory when it lies beneath it.
pub fn relative_to_cwd(path: &Path) -> String {
    if path.is_absolute() {
        if let Ok(cwd) = std::env::current_dir() {
            if let Ok(rel) = path.strip_prefix(&cwd) {
                return rel.display().to_string();
            }
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"<form>
        <label for="fn">Full Name</label><input id="fn" name="fullName">
        <label>Email Address <input type="email" name="email"></label>
        <label for="c">Country</label>
        <select id="c" name="country"><option value="uk">UK</option></select>
        <button type="submit" id="submit-btn">Submit</button>
    </form>"#;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_detect_maps_columns() {
        let detection = detect(FORM, &cols(&["full_name", "email_address", "country"]), 75, "f.html");
        let mappings: Vec<_> = detection.config.field_mappings.iter().collect();
        assert_eq!(
            mappings,
            vec![
                ("full_name", "fullName"),
                ("email_address", "email"),
                ("country", "country")
            ]
        );
        assert!(detection.matches.iter().all(|m| m.score == 100));
        assert_eq!(detection.config.submit_button.value, "submit-btn");
        assert_eq!(detection.config.form_url, "f.html");
    }

    #[test]
    fn test_short_column_maps_to_longer_label() {
        let form = r#"<form>
            <label for="e">Email Address</label><input id="e" name="contactEmail">
            <label for="p">Phone Number</label><input id="p" name="tel">
        </form>"#;
        let detection = detect(form, &cols(&["email", "phone"]), DEFAULT_THRESHOLD, "f.html");

        let mappings: Vec<_> = detection.config.field_mappings.iter().collect();
        assert_eq!(mappings, vec![("email", "contactEmail"), ("phone", "tel")]);
        assert!(detection.unmatched.is_empty());
        assert!(detection.matches.iter().all(|m| m.score == 90));
    }

    #[test]
    fn test_below_threshold_never_mapped() {
        let detection = detect(FORM, &cols(&["date_of_birth"]), 75, "f.html");
        assert!(detection.config.field_mappings.is_empty());
        assert_eq!(detection.unmatched.len(), 1);
        let miss = &detection.unmatched[0];
        assert!(miss.best_guess.is_some());
        assert!(miss.score.unwrap() < 75);
    }

    #[test]
    fn test_threshold_zero_maps_everything() {
        let detection = detect(FORM, &cols(&["zzz"]), 0, "f.html");
        assert_eq!(detection.config.field_mappings.len(), 1);
    }

    #[test]
    fn test_no_labels() {
        let detection = detect("<form></form>", &cols(&["email"]), 75, "f.html");
        assert_eq!(
            detection.unmatched,
            vec![UnmatchedColumn {
                column: "email".to_string(),
                best_guess: None,
                score: None
            }]
        );
    }

    #[test]
    fn test_relative_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            relative_to_cwd(&cwd.join("forms").join("a.html")),
            Path::new("forms").join("a.html").display().to_string()
        );
        assert_eq!(relative_to_cwd(Path::new("x/y.html")), "x/y.html");
    }
}
