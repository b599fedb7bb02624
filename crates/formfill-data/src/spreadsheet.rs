//! Spreadsheet loading (`.xlsx`, `.xls` and friends) via calamine.

use crate::error::{DataError, Result};
use crate::value::{float_cell, normalize_headers, text_cell};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use formfill_core::{CellValue, RowRecord};
use std::path::Path;

/// Read the first worksheet; its first row holds the headers.
pub fn load_spreadsheet(path: &Path) -> Result<Vec<RowRecord>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| DataError::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::Spreadsheet("workbook has no worksheets".to_string()))?
        .map_err(|e| DataError::Spreadsheet(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Ok(Vec::new());
    };
    let headers = normalize_headers(header_row.iter().map(ToString::to_string));

    let rows = sheet_rows
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = cells.get(i).map_or(CellValue::Null, spreadsheet_cell);
                    (header.clone(), value)
                })
                .collect::<RowRecord>()
        })
        .collect();

    Ok(rows)
}

fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(n) => CellValue::Integer(*n),
        Data::Float(f) => float_cell(*f),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => text_cell(s),
        Data::DateTime(_) => cell.as_datetime().map_or(CellValue::Null, |dt| {
            CellValue::Text(dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        }),
    }
}
