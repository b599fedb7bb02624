//! JSON loading: a top-level array of flat objects.

use crate::error::{DataError, Result};
use crate::value::{float_cell, text_cell};
use formfill_core::{CellValue, RowRecord};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a JSON array of objects.
///
/// The column set is the union of all object keys in first-seen order; a
/// record lacking a key gets `Null` for it.
pub fn load_json(path: &Path) -> Result<Vec<RowRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let document: Value = serde_json::from_reader(reader)?;

    let Value::Array(items) = document else {
        return Err(DataError::InvalidData(
            "expected a JSON array of objects".to_string(),
        ));
    };

    let objects = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(DataError::InvalidData(format!(
                "record {index} is not an object: {other}"
            ))),
        })
        .collect::<Result<Vec<Map<String, Value>>>>()?;

    let mut columns: Vec<String> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    Ok(objects
        .iter()
        .map(|object| {
            columns
                .iter()
                .map(|column| {
                    let value = object.get(column).map_or(CellValue::Null, json_cell);
                    (column.clone(), value)
                })
                .collect()
        })
        .collect())
}

fn json_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Integer(i),
            None => n.as_f64().map_or(CellValue::Null, float_cell),
        },
        Value::String(s) => text_cell(s),
        nested @ (Value::Array(_) | Value::Object(_)) => CellValue::Text(nested.to_string()),
    }
}
