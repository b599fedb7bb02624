//! CSV loading.

use crate::error::Result;
use crate::value::{infer_cell, normalize_headers};
use formfill_core::{CellValue, RowRecord};
use std::path::Path;

/// Read a CSV file with a header row.
///
/// Short rows are padded with `Null`; extra trailing fields are dropped.
pub fn load_csv(path: &Path) -> Result<Vec<RowRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)?;

    let headers = normalize_headers(reader.headers()?.iter());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RowRecord = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = record.get(i).map_or(CellValue::Null, infer_cell);
                (header.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
