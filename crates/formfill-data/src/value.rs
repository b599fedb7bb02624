//! Scalar normalization shared by all loaders.

use formfill_core::CellValue;

/// Text markers treated as a missing value.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw string is one of the recognised missing-value markers.
#[must_use]
pub fn is_missing_marker(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw)
}

/// Text cell with missing markers mapped to `Null`.
#[must_use]
pub fn text_cell(raw: &str) -> CellValue {
    if is_missing_marker(raw) {
        CellValue::Null
    } else {
        CellValue::Text(raw.to_string())
    }
}

/// Float cell; NaN becomes `Null` and whole numbers become integers.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn float_cell(value: f64) -> CellValue {
    if value.is_nan() {
        CellValue::Null
    } else if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        CellValue::Integer(value as i64)
    } else {
        CellValue::Float(value)
    }
}

/// Infer a typed scalar from a delimited-text field.
///
/// Numbers with a leading zero (`007`, `02134`) stay text so identifiers
/// such as postcodes survive unchanged.
#[must_use]
pub fn infer_cell(raw: &str) -> CellValue {
    if is_missing_marker(raw) {
        return CellValue::Null;
    }

    if raw.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    if has_significant_leading_zero(raw) {
        return CellValue::Text(raw.to_string());
    }

    if let Ok(n) = raw.parse::<i64>() {
        return CellValue::Integer(n);
    }

    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && looks_numeric(raw) => CellValue::Float(f),
        _ => CellValue::Text(raw.to_string()),
    }
}

fn has_significant_leading_zero(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.")
}

// `f64::from_str` also accepts "inf" and "infinity"; only plain decimals count.
fn looks_numeric(raw: &str) -> bool {
    raw.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

/// Make headers unique and non-empty.
///
/// Blank headers become `Unnamed: N`; repeats get a `.1`, `.2`, ... suffix.
#[must_use]
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut headers: Vec<String> = Vec::new();
    for (index, header) in raw.into_iter().enumerate() {
        let header = header.as_ref();
        let base = if header.trim().is_empty() {
            format!("Unnamed: {index}")
        } else {
            header.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while headers.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        headers.push(candidate);
    }
    headers
}
