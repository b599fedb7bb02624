//! Shared data model: cell values, row records and fill results.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A single scalar read from a data file.
///
/// `Null` is the one absence sentinel; every loader maps its own notion of a
/// missing value onto it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing value
    #[default]
    Null,
    /// Boolean cell
    Bool(bool),
    /// Integral number
    Integer(i64),
    /// Non-integral number
    Float(f64),
    /// Free text, kept exactly as read
    Text(String),
}

impl CellValue {
    /// True for `Null` and for text that is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Truthiness used when deciding whether to tick a checkbox.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Check whether this is the null sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// One row of input data: column name to value, in file column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowRecord {
    cells: Vec<(String, CellValue)>,
}

impl RowRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate `(column, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of columns in this record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the record has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            match record.cells.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = value,
                None => record.cells.push((name, value)),
            }
        }
        record
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Outcome category for one submitted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FillStatus {
    /// The form was submitted and the success indicator was seen
    Success,
    /// The row could not be filled or the submission was not confirmed
    Failed,
    /// The browser session became unusable after submission
    Crashed,
}

impl FillStatus {
    /// Upper-case label as written to reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Crashed => "CRASHED",
        }
    }
}

impl fmt::Display for FillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of attempting to submit one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillResult {
    /// Outcome category
    pub status: FillStatus,
    /// Human-readable explanation
    pub reason: String,
    /// The row that was submitted
    pub data: RowRecord,
}

impl FillResult {
    /// A confirmed submission.
    #[must_use]
    pub fn success(reason: impl Into<String>, data: RowRecord) -> Self {
        Self {
            status: FillStatus::Success,
            reason: reason.into(),
            data,
        }
    }

    /// A failed fill or unconfirmed submission.
    #[must_use]
    pub fn failed(reason: impl Into<String>, data: RowRecord) -> Self {
        Self {
            status: FillStatus::Failed,
            reason: reason.into(),
            data,
        }
    }

    /// A browser crash after submission.
    #[must_use]
    pub fn crashed(reason: impl Into<String>, data: RowRecord) -> Self {
        Self {
            status: FillStatus::Crashed,
            reason: reason.into(),
            data,
        }
    }
}

/// How a submission is recognised as successful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuccessIndicator {
    /// The page URL after submission contains this fragment
    UrlContains {
        /// Fragment to look for, e.g. `success.html`
        url_contains: String,
    },
    /// An element matching this CSS selector appears after submission
    SelectorPresent {
        /// CSS selector of the confirmation element
        selector: String,
        /// How long to wait for it
        #[serde(default = "default_selector_timeout_ms")]
        timeout_ms: u64,
    },
}

fn default_selector_timeout_ms() -> u64 {
    5000
}

impl Default for SuccessIndicator {
    fn default() -> Self {
        Self::UrlContains {
            url_contains: "success.html".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, CellValue)]) -> RowRecord {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_blank_values() {
        assert!(CellValue::Null.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(CellValue::from("").is_blank());
        assert!(!CellValue::from(" x ").is_blank());
        assert!(!CellValue::Integer(0).is_blank());
    }

    #[test]
    fn test_truthiness() {
        assert!(!CellValue::Null.is_truthy());
        assert!(!CellValue::Bool(false).is_truthy());
        assert!(!CellValue::Integer(0).is_truthy());
        assert!(CellValue::from("N/A").is_truthy());
        assert!(CellValue::Float(0.5).is_truthy());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Integer(42).to_string(), "42");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from("Ada").to_string(), "Ada");
    }

    #[test]
    fn test_row_keeps_column_order() {
        let record = row(&[
            ("zeta", CellValue::from("1")),
            ("alpha", CellValue::from("2")),
        ]);
        let columns: Vec<_> = record.columns().collect();
        assert_eq!(columns, vec!["zeta", "alpha"]);

        let json = serde_json::to_string(&record).expect("serialize row");
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn test_row_duplicate_column_overwrites() {
        let record = row(&[
            ("a", CellValue::from("first")),
            ("a", CellValue::from("second")),
        ]);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("a"), Some(&CellValue::from("second")));
    }

    #[test]
    fn test_fill_status_serialization() {
        let json = serde_json::to_string(&FillStatus::Crashed).expect("serialize status");
        assert_eq!(json, "\"CRASHED\"");
        assert_eq!(FillStatus::Success.to_string(), "SUCCESS");
    }

    #[test]
    fn test_success_indicator_shapes() {
        let url: SuccessIndicator =
            serde_json::from_str(r#"{"url_contains": "thanks"}"#).expect("parse url indicator");
        assert_eq!(
            url,
            SuccessIndicator::UrlContains {
                url_contains: "thanks".to_string()
            }
        );

        let sel: SuccessIndicator =
            serde_json::from_str(r##"{"selector": "#done"}"##).expect("parse selector indicator");
        assert_eq!(
            sel,
            SuccessIndicator::SelectorPresent {
                selector: "#done".to_string(),
                timeout_ms: 5000
            }
        );
    }
}
